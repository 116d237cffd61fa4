//! Core data types for the build and query pipelines

pub mod document;
pub mod query;
pub mod response;

pub use document::{Chunk, ChunkMeta, DocMeta, RawDocument, Section};
pub use query::QueryRequest;
pub use response::{QueryResponse, StatsSnapshot};
