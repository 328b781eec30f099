//! Order history client.
//!
//! Orders are read-only views of backend data; nothing is mutated from this
//! side.

use std::sync::Arc;

use tracing::instrument;

use gadgetmart_core::Email;

use crate::config::BackendConfig;

use super::types::Order;
use super::{BackendError, error_for_response};

/// Client for the backend orders API.
#[derive(Clone)]
pub struct OrdersClient {
    inner: Arc<OrdersClientInner>,
}

struct OrdersClientInner {
    client: reqwest::Client,
    api_url: String,
}

impl OrdersClient {
    /// Create a new orders client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(OrdersClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.clone(),
            }),
        }
    }

    /// Fetch the order history for `email`.
    ///
    /// A response that is not a JSON array is treated as an empty history
    /// rather than an error - the backend returns an object-shaped message
    /// for accounts with no orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    #[instrument(skip(self, token), fields(email = %email))]
    pub async fn list(&self, token: &str, email: &Email) -> Result<Vec<Order>, BackendError> {
        let url = format!(
            "{}/api/orders?email={}",
            self.inner.api_url,
            urlencoding::encode(email.as_str())
        );

        let response = self.inner.client.get(&url).bearer_auth(token).send().await?;

        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        if !body.is_array() {
            return Ok(Vec::new());
        }

        serde_json::from_value(body).map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_client_is_clone_send_sync() {
        fn assert_clone<T: Clone>() {}
        fn assert_send_sync<T: Send + Sync>() {}
        assert_clone::<OrdersClient>();
        assert_send_sync::<OrdersClient>();
    }
}
