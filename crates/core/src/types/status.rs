//! Status enums for backend-provided entities.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Order status as reported by the backend order service.
///
/// Unknown values deserialize to [`OrderStatus::Other`] so a new backend
/// state never breaks order-history rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Payment captured.
    Paid,
    /// Order placed, payment not yet captured.
    #[default]
    Pending,
    /// Payment or order failed.
    Failed,
    /// Order cancelled.
    Cancelled,
    /// Any state this client does not know about.
    #[serde(other)]
    Other,
}

impl OrderStatus {
    /// Whether this status should be highlighted in the order history.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Paid => "PAID",
            Self::Pending => "PENDING",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::Other => "UNKNOWN",
        };
        write!(f, "{s}")
    }
}

/// Result of a payment verification round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Gateway signature verified; payment settled.
    Success,
    /// Verification rejected.
    Failed,
}

impl PaymentStatus {
    /// Whether the payment went through.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips_screaming_snake_case() {
        let status: OrderStatus = serde_json::from_str("\"PAID\"").unwrap();
        assert_eq!(status, OrderStatus::Paid);
        assert!(status.is_paid());

        assert_eq!(serde_json::to_string(&OrderStatus::Pending).unwrap(), "\"PENDING\"");
    }

    #[test]
    fn unknown_order_status_falls_back() {
        let status: OrderStatus = serde_json::from_str("\"SHIPPED_TO_MOON\"").unwrap();
        assert_eq!(status, OrderStatus::Other);
    }

    #[test]
    fn payment_status_matches_backend_wire_format() {
        let status: PaymentStatus = serde_json::from_str("\"SUCCESS\"").unwrap();
        assert!(status.is_success());

        let status: PaymentStatus = serde_json::from_str("\"FAILED\"").unwrap();
        assert!(!status.is_success());
    }
}
