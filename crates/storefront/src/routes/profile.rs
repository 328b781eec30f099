//! Profile setup route handlers.
//!
//! First-login flow: a user whose OTP verification came back without a name
//! lands here to fill in name, phone, and location before continuing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::backend::types::ProfileUpdate;
use crate::filters;
use crate::middleware::{RequireAuth, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Profile form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub name: String,
    pub phone: String,
    pub location_name: String,
}

/// Profile setup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/setup_profile.html")]
pub struct SetupProfileTemplate {
    pub name: String,
    pub error: Option<String>,
}

/// Display the profile setup form, name prefilled from the session.
#[instrument(skip(authed))]
pub async fn show(RequireAuth(authed): RequireAuth) -> impl IntoResponse {
    SetupProfileTemplate {
        name: authed.user.name.unwrap_or_default(),
        error: None,
    }
}

/// Save the profile to the backend and refresh the cached identity.
#[instrument(skip(state, session, authed, form))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(authed): RequireAuth,
    Form(form): Form<ProfileForm>,
) -> Response {
    let update = ProfileUpdate {
        name: form.name.trim().to_string(),
        phone: form.phone.trim().to_string(),
        location_name: form.location_name.trim().to_string(),
    };

    match state.auth_api().update_profile(&authed.token, &update).await {
        Ok(profile) => {
            let user = CurrentUser {
                name: Some(profile.name),
                ..authed.user
            };

            if let Err(e) = set_current_user(&session, &user, &authed.token).await {
                tracing::error!("Failed to refresh session after profile update: {e}");
            }

            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("Profile update failed: {e}");
            SetupProfileTemplate {
                name: update.name,
                error: Some("Failed to update profile. Please try again.".to_string()),
            }
            .into_response()
        }
    }
}
