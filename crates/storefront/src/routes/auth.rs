//! Authentication route handlers.
//!
//! Passwordless email OTP flow against the backend auth API. The flow is two
//! server-rendered steps: email form, then code form. The backend emails the
//! codes and mints the bearer tokens - nothing is issued here.

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

use gadgetmart_core::{Email, OtpCode};

use crate::backend::BackendError;
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Resend cooldown shown on the OTP step (seconds). A UI affordance only -
/// the backend applies its own limits.
const RESEND_COOLDOWN_SECONDS: u32 = 60;

// =============================================================================
// Form Types
// =============================================================================

/// Email step form data.
#[derive(Debug, Deserialize)]
pub struct SendOtpForm {
    pub email: String,
}

/// OTP step form data.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpForm {
    pub email: String,
    pub otp: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template (email step).
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// OTP verification template (code step).
#[derive(Template, WebTemplate)]
#[template(path = "auth/verify.html")]
pub struct VerifyTemplate {
    pub email: String,
    pub error: Option<String>,
    pub resend_seconds: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page. Logged-in visitors go straight home.
#[instrument(skip(user))]
pub async fn login_page(OptionalAuth(user): OptionalAuth) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate { error: None }.into_response()
}

/// Handle the email step: ask the backend to send a code, then render the
/// OTP step.
#[instrument(skip(state, form))]
pub async fn send_otp(State(state): State<AppState>, Form(form): Form<SendOtpForm>) -> Response {
    let email = match Email::parse(form.email.trim()) {
        Ok(email) => email,
        Err(e) => {
            return LoginTemplate {
                error: Some(e.to_string()),
            }
            .into_response();
        }
    };

    match state.auth_api().send_otp(&email).await {
        Ok(()) => VerifyTemplate {
            email: email.into_inner(),
            error: None,
            resend_seconds: RESEND_COOLDOWN_SECONDS,
        }
        .into_response(),
        Err(e) => {
            tracing::warn!("Failed to send OTP: {e}");
            LoginTemplate {
                error: Some(backend_message(&e, "Failed to send OTP")),
            }
            .into_response()
        }
    }
}

/// Handle the OTP step: verify the code, cache the identity and bearer token
/// in the session.
///
/// A user with no profile name yet is sent to profile setup.
#[instrument(skip(state, session, form))]
pub async fn verify_otp(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<VerifyOtpForm>,
) -> Response {
    let email = match Email::parse(form.email.trim()) {
        Ok(email) => email,
        Err(e) => {
            return LoginTemplate {
                error: Some(e.to_string()),
            }
            .into_response();
        }
    };

    let code = match OtpCode::parse(&form.otp) {
        Ok(code) => code,
        Err(e) => {
            return VerifyTemplate {
                email: email.into_inner(),
                error: Some(e.to_string()),
                resend_seconds: 0,
            }
            .into_response();
        }
    };

    match state.auth_api().verify_otp(&email, &code).await {
        Ok(auth_session) => {
            let needs_profile = auth_session.name.is_none();

            let user = CurrentUser {
                email: Email::parse(&auth_session.email).unwrap_or(email),
                name: auth_session.name,
                role: auth_session.role,
            };

            if let Err(e) = set_current_user(&session, &user, &auth_session.token).await {
                tracing::error!("Failed to set session: {e}");
                return LoginTemplate {
                    error: Some("Something went wrong. Please try again.".to_string()),
                }
                .into_response();
            }

            if needs_profile {
                Redirect::to("/setup-profile").into_response()
            } else {
                Redirect::to("/").into_response()
            }
        }
        Err(e) => {
            tracing::warn!("OTP verification failed: {e}");
            VerifyTemplate {
                email: email.into_inner(),
                error: Some(backend_message(&e, "Invalid OTP")),
                resend_seconds: 0,
            }
            .into_response()
        }
    }
}

/// Handle logout: drop the cached identity and destroy the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    // Also destroy the entire session (cart included)
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/").into_response()
}

/// The backend's message for an API rejection, or a fallback.
fn backend_message(error: &BackendError, fallback: &str) -> String {
    match error {
        BackendError::Api { message, .. } if !message.is_empty() => message.clone(),
        _ => fallback.to_string(),
    }
}
