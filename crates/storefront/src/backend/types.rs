//! Wire types for the backend REST API.
//!
//! The backend speaks camelCase JSON. Money crosses the wire as rupee
//! numbers and is converted to [`gadgetmart_core::Paise`] at the view layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gadgetmart_core::{OrderStatus, PaymentStatus};

// =============================================================================
// Products
// =============================================================================

/// A product with its per-platform price quotes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub prices: Vec<PlatformQuote>,
}

impl ProductInfo {
    /// The lowest quoted price in rupees, if any quote exists.
    #[must_use]
    pub fn best_price(&self) -> Option<f64> {
        self.prices
            .iter()
            .map(|quote| quote.price)
            .fold(None, |best, price| {
                Some(best.map_or(price, |b: f64| b.min(price)))
            })
    }
}

/// One platform's price quote for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformQuote {
    pub platform_name: String,
    #[serde(default)]
    pub platform_product_url: String,
    /// Price in rupees.
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

fn default_currency() -> String {
    "INR".to_string()
}

// =============================================================================
// Auth
// =============================================================================

/// Successful OTP verification payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Raw OTP verification response.
///
/// The backend reports rejection either as a non-2xx response or as a 200
/// with `status: "FAILED"`, so every field is optional here and
/// [`crate::backend::AuthClient::verify_otp`] sorts it out.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyOtpWire {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Profile fields submitted from the setup-profile page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: String,
    pub location_name: String,
}

/// Profile as stored by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
}

// =============================================================================
// Saved products
// =============================================================================

/// A product on the user's saved list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProduct {
    pub product_name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Payload for saving a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProductRequest {
    pub name: String,
    pub brand: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Price in rupees.
    pub price: f64,
}

// =============================================================================
// Orders
// =============================================================================

/// An order from the user's history. Read-only on this side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_number: String,
    /// Total in rupees.
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

/// A line item within an order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_name: String,
    pub quantity: u32,
    /// Unit price in rupees.
    pub price: f64,
}

// =============================================================================
// Payments
// =============================================================================

/// Payload for creating a payment order at the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_number: String,
    pub user_email: String,
    /// Amount in rupees.
    pub amount: f64,
}

/// Gateway order handle returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub razorpay_order_id: String,
}

/// Payload for verifying a completed gateway payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

/// Verification result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
