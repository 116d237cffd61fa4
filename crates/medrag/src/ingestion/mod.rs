//! Build-phase document processing: normalization, section splitting,
//! size-bounded chunking, and corpus loading

pub mod chunker;
pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod sections;

pub use chunker::{SectionChunk, SemanticChunker};
pub use loader::TextLoader;
pub use normalize::Normalizer;
pub use pipeline::ChunkPipeline;
pub use sections::SectionSplitter;
