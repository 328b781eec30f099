//! GadgetMart Core - Shared types library.
//!
//! This crate provides common types used across GadgetMart components:
//! - `storefront` - Public-facing price-comparison storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe emails, money, OTP codes, and
//!   order/payment statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
