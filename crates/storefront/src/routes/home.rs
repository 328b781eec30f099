//! Home page route handler.
//!
//! The home page doubles as the results page: with `?q=` it shows the
//! per-platform price comparison for the queried product, otherwise the
//! Fresh Arrivals grid.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::{self, Category, Gadget};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, session_keys};
use crate::routes::search::{ProductResultView, build_result_view};
use crate::state::AppState;

/// How often the promo notification reappears (seconds).
const NOTIFICATION_INTERVAL_SECONDS: i64 = 24 * 60 * 60;

/// Number of gadgets in the Fresh Arrivals grid.
const FRESH_ARRIVALS_COUNT: usize = 12;

/// Home page query parameters.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    #[serde(default)]
    pub q: String,
}

/// Logged-in user display data for templates.
#[derive(Clone)]
pub struct UserView {
    pub name: String,
    pub role: String,
    pub email: String,
}

impl From<&CurrentUser> for UserView {
    fn from(user: &CurrentUser) -> Self {
        Self {
            name: user.display_name().to_string(),
            role: user.role_label().to_string(),
            email: user.email.to_string(),
        }
    }
}

/// Catalog gadget display data for templates.
#[derive(Clone)]
pub struct GadgetCardView {
    pub name: String,
    pub brand: String,
    pub price: String,
    pub price_rupees: String,
    pub icon: String,
    pub image: String,
}

impl From<&Gadget> for GadgetCardView {
    fn from(gadget: &Gadget) -> Self {
        Self {
            name: gadget.name.clone(),
            brand: gadget.brand.to_string(),
            price: gadget.price.display(),
            price_rupees: gadget.price.rupees_string(),
            icon: gadget.icon.to_string(),
            image: gadget.image.to_string(),
        }
    }
}

/// Home page template.
///
/// The cart badge is not rendered here - it loads itself over HTMX so every
/// page shares one fragment.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user: Option<UserView>,
    pub show_notification: bool,
    pub query: String,
    pub lookup_failed: bool,
    pub result: Option<ProductResultView>,
    pub gadgets: Vec<GadgetCardView>,
    pub categories: &'static [Category],
}

/// Display the home page, with price-comparison results when `?q=` is set.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Query(query): Query<HomeQuery>,
) -> impl IntoResponse {
    let show_notification = should_notify(&session).await;

    let query_str = query.q.trim().to_string();
    let mut result = None;
    let mut lookup_failed = false;

    if !query_str.is_empty() {
        match state.products().lookup(&query_str).await {
            Ok(info) => {
                let email = user.as_ref().map(|u| u.email.to_string());
                result = Some(build_result_view(info, email.as_deref(), &mut rand::rng()));
            }
            Err(e) => {
                tracing::warn!("Product lookup failed for {query_str:?}: {e}");
                lookup_failed = true;
            }
        }
    }

    HomeTemplate {
        user: user.as_ref().map(UserView::from),
        show_notification,
        query: query_str,
        lookup_failed,
        result,
        gadgets: catalog::new_launches()
            .iter()
            .take(FRESH_ARRIVALS_COUNT)
            .map(GadgetCardView::from)
            .collect(),
        categories: &catalog::GADGET_CATEGORIES,
    }
}

/// Whether to show the promo notification, at most once per day per session.
async fn should_notify(session: &Session) -> bool {
    let now = chrono::Utc::now().timestamp();

    let last: Option<i64> = session
        .get(session_keys::LAST_NOTIFIED)
        .await
        .ok()
        .flatten();

    let due = last.is_none_or(|then| now - then > NOTIFICATION_INTERVAL_SECONDS);

    if due
        && let Err(e) = session.insert(session_keys::LAST_NOTIFIED, now).await
    {
        tracing::warn!("Failed to record notification timestamp: {e}");
    }

    due
}
