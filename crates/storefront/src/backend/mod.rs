//! Clients for the GadgetMart backend REST API.
//!
//! # Architecture
//!
//! - The backend is the source of truth for products, accounts, orders, and
//!   payments - NO local sync, direct API calls
//! - One client per backend surface: products, auth, orders, payments
//! - In-memory caching via `moka` for product lookups (5 minute TTL)
//! - All authenticated calls send the session's bearer token per request
//!
//! # Example
//!
//! ```rust,ignore
//! use gadgetmart_storefront::backend::ProductsClient;
//!
//! let products = ProductsClient::new(&config.backend);
//! let info = products.lookup("iPhone 16 Pro Max").await?;
//! let best = info.prices.iter().map(|p| p.price).fold(f64::MAX, f64::min);
//! ```

pub mod auth;
pub mod orders;
pub mod payments;
pub mod products;
pub mod types;

pub use auth::AuthClient;
pub use orders::OrdersClient;
pub use payments::PaymentsClient;
pub use products::ProductsClient;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when calling the backend API.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bearer token missing or rejected.
    #[error("Unauthorized")]
    Unauthorized,

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Error body shape the backend uses for failures.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Convert a non-success response into a `BackendError`.
///
/// The backend reports failures as `{"message": "..."}`; anything else falls
/// back to the raw body text.
pub(crate) async fn error_for_response(response: reqwest::Response) -> BackendError {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return BackendError::Unauthorized;
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or(body);

    BackendError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::NotFound("iPhone 16 Pro Max".to_string());
        assert_eq!(err.to_string(), "Not found: iPhone 16 Pro Max");

        let err = BackendError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
    }

    #[test]
    fn test_api_error_body_parses_message() {
        let body: ApiErrorBody =
            serde_json::from_str("{\"message\":\"OTP expired\"}").expect("parse");
        assert_eq!(body.message.as_deref(), Some("OTP expired"));

        let body: ApiErrorBody = serde_json::from_str("{}").expect("parse");
        assert!(body.message.is_none());
    }
}
