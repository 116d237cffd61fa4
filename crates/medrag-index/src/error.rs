//! Error types for the vector index

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for index operations
pub type Result<T> = std::result::Result<T, IndexError>;

/// Vector index errors
#[derive(Debug, Error)]
pub enum IndexError {
    /// Collection directory or one of its files is missing
    #[error("Index collection not found at {0}")]
    CollectionNotFound(PathBuf),

    /// Vector length does not match the collection dimensions
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// An entry with this id was already inserted
    #[error("Duplicate entry id: {0}")]
    DuplicateId(u64),

    /// Manifest is incompatible with this crate version
    #[error("Unsupported index schema version: {0}")]
    UnsupportedSchema(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
