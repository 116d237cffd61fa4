//! Interactive session commands
//!
//! The terminal loop itself lives in the CLI binary; this module owns the
//! command grammar and the per-session retrieval breadth. Commands only
//! touch query-time configuration, never the index.

use std::sync::Arc;

use crate::engine::RagEngine;
use crate::types::{QueryRequest, QueryResponse};

/// A parsed session command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// `/k N` — set the retrieval breadth
    SetBreadth(usize),
    /// `/quit` — end the session
    Quit,
}

impl SessionCommand {
    /// Parse a command line; `None` for anything that is not a command
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();

        if input.eq_ignore_ascii_case("/quit") {
            return Some(Self::Quit);
        }

        if let Some(rest) = input.strip_prefix("/k") {
            let k = rest.trim().parse().ok()?;
            return Some(Self::SetBreadth(k));
        }

        None
    }
}

/// One interactive question-answering session
pub struct ChatSession {
    engine: Arc<RagEngine>,
    k: usize,
}

impl ChatSession {
    /// Start a session with the configured default breadth
    pub fn new(engine: Arc<RagEngine>) -> Self {
        let k = engine.config().retrieval.default_k;
        Self { engine, k }
    }

    /// Current retrieval breadth
    pub fn k(&self) -> usize {
        self.k
    }

    /// Set the retrieval breadth, clamped to the configured range; returns
    /// the value actually set
    pub fn set_breadth(&mut self, k: usize) -> usize {
        let max_k = self.engine.config().retrieval.max_k;
        self.k = k.clamp(1, max_k);
        self.k
    }

    /// Ask a question with the session's breadth
    pub async fn ask(&self, question: &str) -> QueryResponse {
        self.engine
            .answer(&QueryRequest::new(question).with_top_k(self.k))
            .await
    }
}
