//! Saved-items route handlers.
//!
//! The saved list lives on the backend, keyed by product name. Save and
//! remove are HTMX actions; an unauthenticated save redirects the browser
//! to the login page via `HX-Redirect`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use gadgetmart_core::Paise;

use crate::backend::types::{SaveProductRequest, SavedProduct};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::session_keys;
use crate::state::AppState;

// =============================================================================
// View Models
// =============================================================================

/// Saved product display data for templates.
#[derive(Clone)]
pub struct SavedView {
    pub name: String,
    pub brand: String,
    pub image: String,
    pub price: Option<String>,
    /// Link back to the comparison page for this product.
    pub compare_url: String,
}

impl From<&SavedProduct> for SavedView {
    fn from(product: &SavedProduct) -> Self {
        Self {
            name: product.product_name.clone(),
            brand: product.brand.clone(),
            image: product.image_url.clone().unwrap_or_else(|| {
                crate::catalog::image_path(&product.product_name, &product.category).to_string()
            }),
            price: product
                .price
                .map(|price| Paise::from_rupees_f64(price).display()),
            compare_url: format!("/?q={}", urlencoding::encode(&product.product_name)),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Save-product form data (from price cards and the home grid).
#[derive(Debug, Deserialize)]
pub struct SaveForm {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub image_url: Option<String>,
    /// Price in rupees.
    pub price: f64,
}

/// Remove form data.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub product_name: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Saved items page template.
#[derive(Template, WebTemplate)]
#[template(path = "saved/index.html")]
pub struct SavedTemplate {
    pub products: Vec<SavedView>,
}

/// Saved items grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/saved_grid.html")]
pub struct SavedGridTemplate {
    pub products: Vec<SavedView>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Fetch and map the saved list, logging failures as empty.
async fn fetch_views(state: &AppState, token: &str) -> Vec<SavedView> {
    match state.auth_api().saved_products(token).await {
        Ok(products) => products.iter().map(SavedView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch saved products: {e}");
            Vec::new()
        }
    }
}

/// Display the saved items page.
#[instrument(skip(state, authed))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(authed): RequireAuth,
) -> impl IntoResponse {
    SavedTemplate {
        products: fetch_views(&state, &authed.token).await,
    }
}

/// Save a product (HTMX).
///
/// Returns a small confirmation fragment. Visitors who are not logged in get
/// an `HX-Redirect` to the login page, matching the page-level behavior.
#[instrument(skip(state, session, form), fields(product = %form.name))]
pub async fn save(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SaveForm>,
) -> Response {
    let Ok(Some(token)) = session.get::<String>(session_keys::API_TOKEN).await else {
        return (
            AppendHeaders([("HX-Redirect", "/login")]),
            StatusCode::UNAUTHORIZED,
        )
            .into_response();
    };

    let request = SaveProductRequest {
        name: form.name,
        brand: form.brand,
        category: form.category,
        image_url: form.image_url.filter(|url| !url.is_empty()),
        price: form.price,
    };

    match state.auth_api().save_product(&token, &request).await {
        Ok(()) => Html("<span class=\"save-flash\">✓ Saved</span>").into_response(),
        Err(e) => {
            tracing::error!("Failed to save product: {e}");
            (
                StatusCode::BAD_GATEWAY,
                Html("<span class=\"save-flash save-flash-error\">Failed to save product</span>"),
            )
                .into_response()
        }
    }
}

/// Remove a saved product (HTMX).
///
/// Returns the refreshed grid fragment.
#[instrument(skip(state, authed, form), fields(product = %form.product_name))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(authed): RequireAuth,
    Form(form): Form<RemoveForm>,
) -> Response {
    if let Err(e) = state
        .auth_api()
        .delete_saved(&authed.token, &form.product_name)
        .await
    {
        tracing::error!("Failed to remove saved product: {e}");
    }

    SavedGridTemplate {
        products: fetch_views(&state, &authed.token).await,
    }
    .into_response()
}
