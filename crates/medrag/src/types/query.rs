//! Query request types

use serde::{Deserialize, Serialize};

/// A question posed against the indexed corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to answer
    pub question: String,

    /// Retrieval breadth override; falls back to the session default and is
    /// clamped to the configured range
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl QueryRequest {
    /// Create a request with the default retrieval breadth
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            top_k: None,
        }
    }

    /// Set the retrieval breadth
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }
}
