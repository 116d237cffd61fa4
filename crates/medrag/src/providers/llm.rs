//! Generation provider trait for answer synthesis

use async_trait::async_trait;
use thiserror::Error;

use crate::error::Result;

/// Output of a generation backend.
///
/// Backends return this instead of their raw response objects; the single
/// text accessor is the only operation the pipeline relies on.
#[derive(Debug, Clone)]
pub struct GeneratedText {
    text: String,
}

impl GeneratedText {
    /// Wrap backend output
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Borrow the generated text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Take the generated text
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Returned by capability initialization when no generation backend can be
/// reached; the caller decides whether to fall back to simulation mode.
#[derive(Debug, Error)]
#[error("generation capability unavailable: {reason}")]
pub struct Unavailable {
    /// Why initialization failed
    pub reason: String,
}

/// Trait for LLM-based answer generation
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text from a system instruction and a user prompt
    async fn generate(&self, system: &str, user: &str) -> Result<GeneratedText>;

    /// Check whether the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Generation model identifier
    fn model(&self) -> &str;
}
