//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (with ?q= price comparison)
//! GET  /health                 - Health check
//! GET  /search/suggest         - Search suggestions fragment (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! POST /cart/clear             - Empty the cart (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! GET  /cart/checkout          - Redirect to combined checkout
//!
//! # Checkout
//! GET  /checkout               - Checkout page (Razorpay widget)
//! POST /checkout/create-order  - Create gateway order (JSON)
//! POST /checkout/verify        - Verify gateway payment (JSON)
//!
//! # Auth (OTP)
//! GET  /login                  - Email step
//! POST /login/send-otp         - Send code, render OTP step
//! POST /login/verify-otp       - Verify code, establish session
//! POST /logout                 - Logout action
//! GET  /setup-profile          - Profile form (requires auth)
//! POST /setup-profile          - Save profile (requires auth)
//!
//! # Account (requires auth)
//! GET  /orders                 - Order history
//! GET  /saved                  - Saved items
//! POST /saved                  - Save a product (HTMX)
//! POST /saved/remove           - Remove a saved product (HTMX)
//!
//! # API
//! POST /api/chat               - Shopping-assistant chat (JSON)
//! ```

pub mod auth;
pub mod cart;
pub mod chat;
pub mod checkout;
pub mod home;
pub mod orders;
pub mod profile;
pub mod saved;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the auth routes router.
///
/// The OTP endpoints sit behind the strict rate limiter - each send-otp
/// call makes the backend send an email.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page))
        .route("/login/send-otp", post(auth::send_otp))
        .route("/login/verify-otp", post(auth::verify_otp))
        .route("/logout", post(auth::logout))
        .layer(auth_rate_limiter())
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
        .route("/checkout", get(cart::checkout))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/create-order", post(checkout::create_order))
        .route("/verify", post(checkout::verify))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(chat::send))
        .layer(api_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page (doubles as the price-comparison results page)
        .route("/", get(home::home))
        // Search suggestions
        .route("/search/suggest", get(search::suggest))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout routes
        .nest("/checkout", checkout_routes())
        // Account routes
        .route("/orders", get(orders::index))
        .route("/saved", get(saved::index).post(saved::save))
        .route("/saved/remove", post(saved::remove))
        .route("/setup-profile", get(profile::show).post(profile::update))
        // Auth routes
        .merge(auth_routes())
        // JSON API
        .merge(api_routes())
}
