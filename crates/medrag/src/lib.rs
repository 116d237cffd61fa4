//! medrag: document Q&A over a medical corpus with source attribution
//!
//! The build pipeline normalizes raw document text, splits it into titled
//! sections, subdivides oversized sections into bounded overlapping chunks,
//! persists the chunk collection, and builds a cosine similarity index over
//! chunk embeddings. The query pipeline embeds a question, retrieves the
//! nearest chunks, assembles a bounded context with source labels, and hands
//! it to an answer-generation backend (or an extractive fallback when none
//! is configured).

pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod index;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod session;
pub mod storage;
pub mod types;

pub use config::RagConfig;
pub use engine::RagEngine;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, ChunkMeta, DocMeta, RawDocument, Section},
    query::QueryRequest,
    response::{QueryResponse, StatsSnapshot},
};
