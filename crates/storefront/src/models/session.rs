//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use gadgetmart_core::Email;

/// Session-stored user identity.
///
/// Cached from the backend's OTP verification response. No refresh or expiry
/// logic client-side - the bearer token is used until the backend rejects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's email address.
    pub email: Email,
    /// Display name, absent until the profile is set up.
    pub name: Option<String>,
    /// Role label from the backend (e.g., "MEMBER").
    pub role: Option<String>,
}

impl CurrentUser {
    /// Name to show in the nav: the profile name, or the email local part.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.email.local_part())
    }

    /// Role label to show in the nav.
    #[must_use]
    pub fn role_label(&self) -> &str {
        self.role.as_deref().unwrap_or("MEMBER")
    }
}

/// Session keys for storefront data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the backend API bearer token.
    pub const API_TOKEN: &str = "api_token";

    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for the epoch seconds of the last promo notification.
    pub const LAST_NOTIFIED: &str = "last_notified";
}
