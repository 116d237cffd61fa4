//! Capability abstractions for embeddings and answer generation
//!
//! The pipeline talks to both capabilities through traits so backends can
//! be swapped without touching the build or query flow.

pub mod embedding;
pub mod llm;
pub mod ollama;

pub use embedding::EmbeddingProvider;
pub use llm::{GeneratedText, GenerationProvider, Unavailable};
pub use ollama::{OllamaEmbedder, OllamaGenerator};
