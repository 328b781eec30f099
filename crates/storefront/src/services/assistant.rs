//! Gemini API client for the shopping-assistant chat.
//!
//! The chat call is made server-side so the API key never reaches the
//! browser. The key rides in the request URL, so the URL must never be
//! logged.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::config::AssistantConfig;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const SYSTEM_PROMPT: &str = "You are GadgetMart's friendly AI shopping assistant. GadgetMart is \
a premium tech e-commerce platform selling the latest gadgets - iPhones, MacBooks, Samsung \
devices, headphones, and more. Help users find products, compare prices, and make informed \
purchase decisions. Keep responses concise, helpful, and friendly.";

/// Reply used when the model returns no usable text.
const FALLBACK_REPLY: &str =
    "I'm having a little trouble right now. Please try again in a moment!";

/// Reply used when the model refuses on safety grounds.
const SAFETY_REPLY: &str =
    "I'm sorry, but I can't discuss that topic as it violates safety guidelines.";

const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 500;

/// Errors that can occur when calling the Gemini API.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// No API key is configured; the assistant is disabled.
    #[error("Assistant is not configured")]
    NotConfigured,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    /// Full `generateContent` endpoint including the key, or `None` when no
    /// key is configured.
    endpoint: Option<String>,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// A missing API key produces a client whose [`Self::reply`] always
    /// returns [`AssistantError::NotConfigured`].
    #[must_use]
    pub fn new(config: &AssistantConfig) -> Self {
        let endpoint = config.api_key.as_ref().map(|key| {
            format!(
                "{GEMINI_API_BASE}/{}:generateContent?key={}",
                config.model,
                key.expose_secret()
            )
        });

        Self {
            inner: Arc::new(GeminiClientInner {
                client: reqwest::Client::new(),
                endpoint,
            }),
        }
    }

    /// Whether an API key is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.inner.endpoint.is_some()
    }

    /// Send one user message and get the assistant's reply.
    ///
    /// The system prompt is prepended server-side. A safety-blocked or empty
    /// completion yields a canned reply rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if no key is configured, the request fails, or the
    /// API rejects it.
    #[instrument(skip(self, message))]
    pub async fn reply(&self, message: &str) -> Result<String, AssistantError> {
        let endpoint = self
            .inner
            .endpoint
            .as_ref()
            .ok_or(AssistantError::NotConfigured)?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("{SYSTEM_PROMPT}\n\nUser: {message}"),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .inner
            .client
            .post(endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            return Err(Self::handle_error_status(status, response).await);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Parse(e.to_string()))?;

        Ok(extract_reply(body))
    }

    /// Handle an error status code.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> AssistantError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return AssistantError::RateLimited(retry_after);
        }

        match response.text().await {
            Ok(body) => {
                let message = serde_json::from_str::<ApiErrorResponse>(&body).map_or_else(
                    |_| format!("Gemini API error ({status})"),
                    |e| e.error.message,
                );
                AssistantError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
            Err(e) => AssistantError::Http(e),
        }
    }
}

/// Pull the reply text out of a completion, substituting the canned replies
/// for safety blocks and empty candidates.
fn extract_reply(response: GenerateContentResponse) -> String {
    let Some(candidate) = response.candidates.into_iter().flatten().next() else {
        return FALLBACK_REPLY.to_string();
    };

    let text = candidate
        .content
        .into_iter()
        .flat_map(|content| content.parts)
        .map(|part| part.text)
        .next()
        .filter(|text| !text.is_empty());

    match text {
        Some(text) => text,
        None if candidate.finish_reason.as_deref() == Some("SAFETY") => SAFETY_REPLY.to_string(),
        None => FALLBACK_REPLY.to_string(),
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Request body for `generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// Response body for `generateContent`.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}
