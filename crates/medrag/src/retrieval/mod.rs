//! Query-time retrieval and context assembly

pub mod search;

pub use search::{AnswerContext, Retrieval, RetrievalOutcome, Retriever, ScoredChunk};
