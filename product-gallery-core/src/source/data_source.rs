use super::client::ProductClient;
use super::models::{Product, ProductsResponse};
use crate::error::GalleryError;
use log::{debug, error};
use std::future::Future;
use std::path::PathBuf;

/// Something that can produce the product list once.
///
/// `fetch` never fails: any network, status or parse problem is logged and
/// resolves to an empty `ProductsResponse`. A caller therefore cannot tell a
/// transient failure apart from "nothing loaded yet"; both render as the
/// loading state.
pub trait DataSource {
    fn fetch(&self) -> impl Future<Output = ProductsResponse> + Send;
}

/// Fetches the list from a fixed HTTP endpoint. No parameters, no timeout,
/// no retry.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: ProductClient,
    endpoint: String,
}

impl HttpDataSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, GalleryError> {
        Ok(Self::with_client(ProductClient::new()?, endpoint))
    }

    pub fn with_client(client: ProductClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn client(&self) -> &ProductClient {
        &self.client
    }
}

impl DataSource for HttpDataSource {
    async fn fetch(&self) -> ProductsResponse {
        match self.client.get_products(&self.endpoint).await {
            Ok(response) => {
                debug!(
                    "fetched {} products from {}",
                    response.products.len(),
                    self.endpoint
                );
                response
            }
            Err(e) => {
                error!("Failed to fetch products from {}: {}", self.endpoint, e);
                ProductsResponse::empty()
            }
        }
    }
}

/// Reads the same JSON shape from a local file.
#[derive(Debug, Clone)]
pub struct FileDataSource {
    path: PathBuf,
}

impl FileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Result<ProductsResponse, GalleryError> {
        let body = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl DataSource for FileDataSource {
    async fn fetch(&self) -> ProductsResponse {
        match self.read().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to read products from {}: {}", self.path.display(), e);
                ProductsResponse::empty()
            }
        }
    }
}

/// In-memory list, handed out by clone on every fetch.
#[derive(Debug, Clone, Default)]
pub struct StaticDataSource {
    products: Vec<Product>,
}

impl StaticDataSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl DataSource for StaticDataSource {
    async fn fetch(&self) -> ProductsResponse {
        ProductsResponse {
            products: self.products.clone(),
        }
    }
}
