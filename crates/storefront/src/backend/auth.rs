//! Backend auth API client: OTP login, profile, and the saved-items list.
//!
//! The storefront never issues or validates credentials itself - the backend
//! emails the one-time codes and mints the bearer tokens. This client only
//! relays.

use std::sync::Arc;

use tracing::instrument;

use gadgetmart_core::{Email, OtpCode};

use crate::config::BackendConfig;

use super::types::{AuthSession, Profile, ProfileUpdate, SaveProductRequest, SavedProduct, VerifyOtpWire};
use super::{BackendError, error_for_response};

/// Client for the backend auth API.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    client: reqwest::Client,
    api_url: String,
}

impl AuthClient {
    /// Create a new auth client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(AuthClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.clone(),
            }),
        }
    }

    /// Ask the backend to email a one-time code to `email`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// address.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn send_otp(&self, email: &Email) -> Result<(), BackendError> {
        let url = format!(
            "{}/api/auth/send-otp?email={}",
            self.inner.api_url,
            urlencoding::encode(email.as_str())
        );

        let response = self.inner.client.post(&url).send().await?;

        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        Ok(())
    }

    /// Verify a one-time code and get a session back.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Api` when the code is rejected - including the
    /// backend's "soft failure" shape, a 200 carrying `status: "FAILED"` and
    /// no token.
    #[instrument(skip(self, code), fields(email = %email))]
    pub async fn verify_otp(
        &self,
        email: &Email,
        code: &OtpCode,
    ) -> Result<AuthSession, BackendError> {
        let url = format!(
            "{}/api/auth/verify-otp?email={}&otp={}",
            self.inner.api_url,
            urlencoding::encode(email.as_str()),
            urlencoding::encode(code.as_str())
        );

        let response = self.inner.client.post(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(error_for_response(response).await);
        }

        let wire: VerifyOtpWire = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        session_from_wire(wire, status.as_u16())
    }

    /// Update the user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    #[instrument(skip(self, token, update))]
    pub async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, BackendError> {
        let url = format!("{}/api/auth/profile", self.inner.api_url);

        let response = self
            .inner
            .client
            .put(&url)
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Fetch the user's saved products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    #[instrument(skip(self, token))]
    pub async fn saved_products(&self, token: &str) -> Result<Vec<SavedProduct>, BackendError> {
        let url = format!("{}/api/auth/saved", self.inner.api_url);

        let response = self.inner.client.get(&url).bearer_auth(token).send().await?;

        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Save a product to the user's list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    #[instrument(skip(self, token, product), fields(product = %product.name))]
    pub async fn save_product(
        &self,
        token: &str,
        product: &SaveProductRequest,
    ) -> Result<(), BackendError> {
        let url = format!("{}/api/auth/saved", self.inner.api_url);

        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(token)
            .json(product)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        Ok(())
    }

    /// Delete a saved product by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    #[instrument(skip(self, token), fields(product = %product_name))]
    pub async fn delete_saved(&self, token: &str, product_name: &str) -> Result<(), BackendError> {
        let url = format!(
            "{}/api/auth/saved/{}",
            self.inner.api_url,
            urlencoding::encode(product_name)
        );

        let response = self
            .inner
            .client
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        Ok(())
    }
}

/// Sort a verification response into a session or a rejection.
fn session_from_wire(wire: VerifyOtpWire, http_status: u16) -> Result<AuthSession, BackendError> {
    let failed = wire.status.as_deref() == Some("FAILED");

    match wire.token {
        Some(token) if !failed => Ok(AuthSession {
            email: wire.email.unwrap_or_default(),
            name: wire.name,
            role: wire.role,
            token,
        }),
        _ => Err(BackendError::Api {
            status: http_status,
            message: wire.message.unwrap_or_else(|| "Invalid OTP".to_string()),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn wire(json: &str) -> VerifyOtpWire {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn verification_with_token_is_a_session() {
        let session = session_from_wire(
            wire(r#"{"token":"jwt-abc","email":"a@b.c","name":"Asha","role":"MEMBER"}"#),
            200,
        )
        .unwrap();

        assert_eq!(session.token, "jwt-abc");
        assert_eq!(session.email, "a@b.c");
        assert_eq!(session.name.as_deref(), Some("Asha"));
    }

    #[test]
    fn soft_failure_is_rejected_with_backend_message() {
        let err = session_from_wire(
            wire(r#"{"status":"FAILED","message":"OTP expired"}"#),
            200,
        )
        .unwrap_err();

        match err {
            BackendError::Api { message, .. } => assert_eq!(message, "OTP expired"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_token_falls_back_to_generic_message() {
        let err = session_from_wire(wire("{}"), 200).unwrap_err();

        match err {
            BackendError::Api { message, .. } => assert_eq!(message, "Invalid OTP"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
