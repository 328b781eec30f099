//! Domain models for storefront.
//!
//! The cart and the logged-in user both live in the session - this storefront
//! keeps no database of its own.

pub mod cart;
pub mod session;

pub use cart::{Cart, CartItem, NewCartItem};
pub use session::{CurrentUser, keys as session_keys};
