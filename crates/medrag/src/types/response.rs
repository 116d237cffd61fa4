//! Query response types

use serde::{Deserialize, Serialize};

/// Response to a query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Whether the question was accepted and answered
    pub success: bool,
    /// Answer text (empty on failure)
    pub answer: String,
    /// Deduplicated source names, first-occurrence order
    pub sources: Vec<String>,
    /// Error message when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResponse {
    /// A successful answer with its sources
    pub fn answered(answer: String, sources: Vec<String>) -> Self {
        Self {
            success: true,
            answer,
            sources,
            error: None,
        }
    }

    /// A rejected query
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            answer: String::new(),
            sources: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Read-only snapshot of the loaded corpus and active capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Distinct documents represented in the index
    pub document_count: usize,
    /// Indexed chunks
    pub chunk_count: usize,
    /// Active generation model, or "simulation" when none is configured
    pub generation_model: String,
    /// Embedding model used at build and query time
    pub embedding_model: String,
}
