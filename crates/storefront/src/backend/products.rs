//! Product lookup client.
//!
//! Wraps the backend's `/api/products/{query}` endpoint. Lookups are cached
//! with `moka` (5-minute TTL) because the backend's scraped quotes refresh on
//! a schedule far slower than page traffic.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use crate::config::BackendConfig;

use super::types::ProductInfo;
use super::{BackendError, error_for_response};

/// Client for the backend products API.
#[derive(Clone)]
pub struct ProductsClient {
    inner: Arc<ProductsClientInner>,
}

struct ProductsClientInner {
    client: reqwest::Client,
    api_url: String,
    cache: Cache<String, ProductInfo>,
}

impl ProductsClient {
    /// Create a new products client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(ProductsClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.clone(),
                cache,
            }),
        }
    }

    /// Look up a product and its per-platform quotes by search query.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if the backend knows no such product,
    /// or another `BackendError` if the request fails.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn lookup(&self, query: &str) -> Result<ProductInfo, BackendError> {
        let cache_key = query.trim().to_lowercase();

        if let Some(info) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product lookup");
            return Ok(info);
        }

        let url = format!(
            "{}/api/products/{}",
            self.inner.api_url,
            urlencoding::encode(query)
        );

        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(format!(
                "Product not found: {query}"
            )));
        }

        if !status.is_success() {
            return Err(error_for_response(response).await);
        }

        let info: ProductInfo = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        self.inner.cache.insert(cache_key, info.clone()).await;

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_client_is_clone_send_sync() {
        fn assert_clone<T: Clone>() {}
        fn assert_send_sync<T: Send + Sync>() {}
        assert_clone::<ProductsClient>();
        assert_send_sync::<ProductsClient>();
    }
}
