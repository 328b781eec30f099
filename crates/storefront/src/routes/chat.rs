//! Shopping-assistant chat endpoint.
//!
//! The chat widget posts here; the Gemini call happens server-side so the
//! API key never reaches the browser.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::services::AssistantError;
use crate::state::AppState;

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Chat reply body.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Chat error body.
#[derive(Debug, Serialize)]
pub struct ChatError {
    pub error: String,
}

/// Handle a chat message (JSON).
#[instrument(skip(state, request))]
pub async fn send(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    if !state.assistant().is_configured() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ChatError {
                error: "AI service is not configured. Please add your GEMINI_API_KEY to the server environment.".to_string(),
            }),
        )
            .into_response();
    }

    let Some(message) = request.message.as_deref().map(str::trim).filter(|m| !m.is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ChatError {
                error: "Invalid request body".to_string(),
            }),
        )
            .into_response();
    };

    match state.assistant().reply(message).await {
        Ok(reply) => Json(ChatReply { reply }).into_response(),
        Err(AssistantError::Api { message, .. }) => {
            tracing::error!("Assistant API error: {message}");
            (StatusCode::BAD_GATEWAY, Json(ChatError { error: message })).into_response()
        }
        Err(e) => {
            tracing::error!("Assistant error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatError {
                    error: "An unexpected error occurred. Please try again.".to_string(),
                }),
            )
                .into_response()
        }
    }
}
