//! Embedding provider trait for mapping text to vectors

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generating text embeddings.
///
/// The same provider must serve both index build and query time; mixing
/// embedding spaces invalidates similarity scores.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, preserving input order.
    ///
    /// The default calls `embed` sequentially; implementations may batch
    /// internally as long as ordering is unaffected.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Embedding dimensions (e.g. 768 for nomic-embed-text)
    fn dimensions(&self) -> usize;

    /// Embedding model identifier
    fn model(&self) -> &str;

    /// Check whether the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
