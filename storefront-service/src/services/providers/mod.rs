//! AI provider abstraction and implementations.
//!
//! The chat relay talks to a [`TextProvider`]; swapping the Gemini client
//! for the deterministic mock is a one-line change at wiring time.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Empty reply from model")]
    EmptyReply,
}

/// Trait for conversational text providers (e.g. Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send a fully-assembled prompt and return the model's reply text.
    async fn send_message(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
