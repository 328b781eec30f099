//! External (non-backend) service clients.

pub mod assistant;

pub use assistant::{AssistantError, GeminiClient};
