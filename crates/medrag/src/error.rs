//! Error types for the RAG pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Blank question, rejected before retrieval
    #[error("Question is empty")]
    EmptyQuestion,

    /// No chunks left to index after filtering
    #[error("No chunks to index: {0}")]
    EmptyCorpus(String),

    /// Embedding capability failure
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Generation capability failure
    #[error("Answer generation failed: {0}")]
    Generation(String),

    /// Similarity index failure
    #[error("Index error: {0}")]
    Index(#[from] medrag_index::IndexError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }
}
