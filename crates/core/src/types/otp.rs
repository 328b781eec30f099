//! One-time password code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OtpCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum OtpCodeError {
    /// The input is not exactly six characters.
    #[error("verification code must be {expected} digits")]
    WrongLength {
        /// Expected number of digits.
        expected: usize,
    },
    /// The input contains a non-digit character.
    #[error("verification code must contain only digits")]
    NonDigit,
}

/// A six-digit one-time password, as emailed to users for passwordless login.
///
/// The storefront never generates or checks these codes - the backend auth
/// service does. This type only guards the wire format so a malformed code
/// is rejected before a round trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Number of digits in a code.
    pub const LENGTH: usize = 6;

    /// Parse an `OtpCode` from user input.
    ///
    /// Whitespace is trimmed first; the remainder must be exactly six ASCII
    /// digits.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is not six ASCII digits.
    pub fn parse(s: &str) -> Result<Self, OtpCodeError> {
        let trimmed = s.trim();

        if trimmed.len() != Self::LENGTH {
            return Err(OtpCodeError::WrongLength {
                expected: Self::LENGTH,
            });
        }

        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OtpCodeError::NonDigit);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digits() {
        let code = OtpCode::parse("482913").unwrap();
        assert_eq!(code.as_str(), "482913");
    }

    #[test]
    fn trims_whitespace() {
        let code = OtpCode::parse("  482913 ").unwrap();
        assert_eq!(code.as_str(), "482913");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            OtpCode::parse("12345"),
            Err(OtpCodeError::WrongLength { expected: 6 })
        ));
        assert!(matches!(
            OtpCode::parse("1234567"),
            Err(OtpCodeError::WrongLength { expected: 6 })
        ));
    }

    #[test]
    fn rejects_non_digits() {
        assert!(matches!(
            OtpCode::parse("12a456"),
            Err(OtpCodeError::NonDigit)
        ));
    }
}
