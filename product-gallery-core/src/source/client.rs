use super::models::ProductsResponse;
use crate::error::GalleryError;
use log::debug;

const USER_AGENT: &str = "product-gallery-core/0.1";
const ACCEPT_JSON: &str = "application/json";
const ACCEPT_IMAGE: &str = "image/*";

/// Thin wrapper over a shared `reqwest::Client`. The same client fetches the
/// JSON list and the thumbnail bytes, so `Accept` is set per request.
#[derive(Debug, Clone)]
pub struct ProductClient {
    client: reqwest::Client,
}

impl ProductClient {
    pub fn new() -> Result<Self, GalleryError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(ProductClient { client })
    }

    pub async fn call(&self, uri: &str, accept: &'static str) -> Result<reqwest::Response, GalleryError> {
        debug!("calling catalog API: {} (accept {})", uri, accept);
        let response = self
            .client
            .get(uri)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await?;
        debug!("catalog API answered {} for {}", response.status(), uri);
        Ok(response.error_for_status()?)
    }

    /// Fetch and decode the full product list. Errors are returned as-is;
    /// the absorb-to-empty behaviour lives in `HttpDataSource`.
    pub async fn get_products(&self, endpoint: &str) -> Result<ProductsResponse, GalleryError> {
        let response = self.call(endpoint, ACCEPT_JSON).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Raw bytes of a thumbnail, for the item renderer.
    pub async fn get_thumbnail(&self, url: &str) -> Result<Vec<u8>, GalleryError> {
        let response = self.call(url, ACCEPT_IMAGE).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::test_server::{http_response, serve_once};

    #[tokio::test]
    async fn thumbnail_request_accepts_images() {
        let (base, request) = serve_once(http_response("200 OK", "image/png", "PNGDATA"));
        let client = ProductClient::new().unwrap();

        let bytes = client
            .get_thumbnail(&format!("{}/thumb.png", base))
            .await
            .unwrap();
        let request = request.join().unwrap().to_lowercase();

        assert_eq!(bytes, b"PNGDATA");
        assert!(request.contains("accept: image/*"), "{}", request);
        assert!(!request.contains("accept: application/json"), "{}", request);
    }

    #[tokio::test]
    async fn product_request_accepts_json() {
        let (base, request) = serve_once(http_response(
            "200 OK",
            "application/json",
            r#"{"products": []}"#,
        ));
        let client = ProductClient::new().unwrap();

        let response = client.get_products(&format!("{}/products", base)).await.unwrap();
        let request = request.join().unwrap().to_lowercase();

        assert!(response.products.is_empty());
        assert!(request.contains("accept: application/json"), "{}", request);
        assert!(request.contains("user-agent: product-gallery-core/0.1"), "{}", request);
    }

    #[tokio::test]
    async fn error_status_is_returned() {
        let (base, request) = serve_once(http_response("404 Not Found", "text/plain", "gone"));
        let client = ProductClient::new().unwrap();

        let result = client.get_products(&format!("{}/products", base)).await;
        request.join().unwrap();

        assert!(matches!(result, Err(GalleryError::Network(_))));
    }
}
