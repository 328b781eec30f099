//! Core types for GadgetMart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod otp;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use otp::{OtpCode, OtpCodeError};
pub use price::Paise;
pub use status::{OrderStatus, PaymentStatus};
