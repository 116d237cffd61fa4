//! Build-phase orchestration: normalize, split into sections, chunk

use crate::config::ChunkingConfig;
use crate::types::RawDocument;

use super::chunker::{SectionChunk, SemanticChunker};
use super::normalize::Normalizer;
use super::sections::SectionSplitter;

/// Runs the document-to-chunks stage of the build pipeline
pub struct ChunkPipeline {
    normalizer: Normalizer,
    chunker: SemanticChunker,
}

impl ChunkPipeline {
    /// Create a pipeline from the chunking configuration
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            normalizer: Normalizer::new(),
            chunker: SemanticChunker::new(config),
        }
    }

    /// Produce section chunks for the whole corpus, in document order.
    /// Deterministic for a fixed corpus and configuration.
    pub fn run(&self, documents: &[RawDocument]) -> Vec<SectionChunk> {
        let mut pieces = Vec::new();

        for doc in documents {
            let cleaned = RawDocument::new(
                doc.meta.clone(),
                self.normalizer.normalize(&doc.text),
                doc.page_count,
            );

            let sections = SectionSplitter::split(&cleaned);
            let before = pieces.len();
            for section in &sections {
                pieces.extend(self.chunker.chunk_section(section));
            }

            tracing::info!(
                document_id = %doc.meta.document_id,
                sections = sections.len(),
                chunks = pieces.len() - before,
                "chunked document"
            );
        }

        pieces
    }
}
