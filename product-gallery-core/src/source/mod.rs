pub mod client;
pub mod data_source;
pub mod models;

#[cfg(test)]
mod test_server;

pub use client::ProductClient;
pub use data_source::{DataSource, FileDataSource, HttpDataSource, StaticDataSource};
pub use models::{Product, ProductsResponse};
