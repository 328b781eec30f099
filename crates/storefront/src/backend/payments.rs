//! Payment gateway proxy client.
//!
//! The storefront never signs or settles anything. It relays order creation
//! and signature verification to the backend payments API, which owns the
//! gateway credentials.

use std::sync::Arc;

use tracing::instrument;

use crate::config::BackendConfig;

use super::types::{
    CreateOrderRequest, CreateOrderResponse, VerifyPaymentRequest, VerifyPaymentResponse,
};
use super::{BackendError, error_for_response};

/// Client for the backend payments API.
#[derive(Clone)]
pub struct PaymentsClient {
    inner: Arc<PaymentsClientInner>,
}

struct PaymentsClientInner {
    client: reqwest::Client,
    api_url: String,
}

impl PaymentsClient {
    /// Create a new payments client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(PaymentsClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.clone(),
            }),
        }
    }

    /// Create a gateway order for the checkout widget.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, request), fields(order_number = %request.order_number))]
    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, BackendError> {
        let url = format!("{}/api/payments/create-order", self.inner.api_url);

        let response = self.inner.client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Verify a completed payment's gateway signature.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails. A failed verification is a
    /// successful call - check [`VerifyPaymentResponse::status`].
    #[instrument(skip(self, request), fields(order_id = %request.razorpay_order_id))]
    pub async fn verify(
        &self,
        request: &VerifyPaymentRequest,
    ) -> Result<VerifyPaymentResponse, BackendError> {
        let url = format!("{}/api/payments/verify", self.inner.api_url);

        let response = self.inner.client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payments_client_is_clone_send_sync() {
        fn assert_clone<T: Clone>() {}
        fn assert_send_sync<T: Send + Sync>() {}
        assert_clone::<PaymentsClient>();
        assert_send_sync::<PaymentsClient>();
    }
}
