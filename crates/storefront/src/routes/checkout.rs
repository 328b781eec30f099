//! Checkout route handlers.
//!
//! The checkout page boots the Razorpay browser widget; the two JSON
//! endpoints proxy order creation and signature verification to the backend
//! payments API, which owns the gateway credentials.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use gadgetmart_core::Paise;

use crate::backend::types::{CreateOrderRequest, CreateOrderResponse, VerifyPaymentRequest};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Product name shown when none is passed.
const DEFAULT_PRODUCT_NAME: &str = "Elite Hardware";

/// Checkout page query parameters.
#[derive(Debug, Deserialize)]
pub struct CheckoutQuery {
    pub product: Option<String>,
    pub amount: Option<f64>,
    pub email: Option<String>,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub product_name: String,
    pub amount: String,
    /// Amount in paise, the unit the gateway widget expects.
    pub amount_paise: i64,
    pub email: String,
    pub razorpay_key_id: String,
}

/// Display the checkout page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<CheckoutQuery>,
) -> impl IntoResponse {
    let amount = Paise::from_rupees_f64(query.amount.unwrap_or(0.0));

    CheckoutTemplate {
        product_name: query
            .product
            .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
        amount: amount.display(),
        amount_paise: amount.as_paise(),
        email: query.email.unwrap_or_default(),
        razorpay_key_id: state.config().razorpay_key_id.clone(),
    }
}

/// Create a gateway order (JSON, called by the checkout script).
#[instrument(skip(state, request), fields(order_number = %request.order_number))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>> {
    let response = state.payments().create_order(&request).await?;
    Ok(Json(response))
}

/// Verify a completed gateway payment (JSON, called by the checkout script).
///
/// A rejected signature is reported in the body, not as an HTTP error -
/// the widget decides what to show.
#[instrument(skip(state, request), fields(order_id = %request.razorpay_order_id))]
pub async fn verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse> {
    let response = state.payments().verify(&request).await?;

    if !response.status.is_success() {
        tracing::warn!("Payment verification rejected");
    }

    Ok(Json(response))
}
