use serde::{Deserialize, Serialize};

/// One catalog entry as served by the products endpoint.
///
/// Only the fields the gallery renders are kept; everything else in the
/// payload (price, rating, stock, ...) is ignored during deserialization.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub thumbnail: String,
}

/// Top-level body of the products endpoint.
///
/// The endpoint also reports `total`, `skip` and `limit`; paging happens
/// client-side over `products`, so those are not modelled.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

impl ProductsResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}
