//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::{AuthClient, OrdersClient, PaymentsClient, ProductsClient};
use crate::config::StorefrontConfig;
use crate::services::GeminiClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the external API clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    products: ProductsClient,
    auth: AuthClient,
    orders: OrdersClient,
    payments: PaymentsClient,
    assistant: GeminiClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let products = ProductsClient::new(&config.backend);
        let auth = AuthClient::new(&config.backend);
        let orders = OrdersClient::new(&config.backend);
        let payments = PaymentsClient::new(&config.backend);
        let assistant = GeminiClient::new(&config.assistant);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                products,
                auth,
                orders,
                payments,
                assistant,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the products API client.
    #[must_use]
    pub fn products(&self) -> &ProductsClient {
        &self.inner.products
    }

    /// Get a reference to the auth API client.
    #[must_use]
    pub fn auth_api(&self) -> &AuthClient {
        &self.inner.auth
    }

    /// Get a reference to the orders API client.
    #[must_use]
    pub fn orders_api(&self) -> &OrdersClient {
        &self.inner.orders
    }

    /// Get a reference to the payments API client.
    #[must_use]
    pub fn payments(&self) -> &PaymentsClient {
        &self.inner.payments
    }

    /// Get a reference to the shopping-assistant client.
    #[must_use]
    pub fn assistant(&self) -> &GeminiClient {
        &self.inner.assistant
    }
}
