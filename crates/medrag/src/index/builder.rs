//! Builds the persistent similarity index from a chunk collection

use std::path::Path;
use std::sync::Arc;

use futures::{stream, StreamExt, TryStreamExt};
use medrag_index::{DistanceSpace, IndexOptions, SimilarityIndex, VectorEntry};

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;
use crate::storage::ChunkStore;
use crate::types::Chunk;

/// Filters, embeds, and indexes a chunk collection.
///
/// Rebuilds are wholesale: the previous collection is destroyed only after
/// every embedding has been computed, so an upstream failure leaves the
/// existing index intact.
pub struct IndexBuilder {
    embedder: Arc<dyn EmbeddingProvider>,
    config: RagConfig,
}

impl IndexBuilder {
    /// Create a builder
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, config: &RagConfig) -> Self {
        Self {
            embedder,
            config: config.clone(),
        }
    }

    /// Build the index from a persisted chunk collection file
    pub async fn build_from_file(&self, path: &Path) -> Result<SimilarityIndex> {
        let chunks = ChunkStore::load(path)?;
        self.build(&chunks).await
    }

    /// Build the index from an in-memory chunk collection
    pub async fn build(&self, chunks: &[Chunk]) -> Result<SimilarityIndex> {
        let retained: Vec<&Chunk> = chunks
            .iter()
            .filter(|chunk| !self.is_excluded(&chunk.metadata.section))
            .collect();

        if retained.is_empty() {
            return Err(Error::EmptyCorpus(
                "no indexable chunks after section filtering".to_string(),
            ));
        }

        tracing::info!(
            total = chunks.len(),
            retained = retained.len(),
            model = %self.embedder.model(),
            "embedding chunks"
        );

        // Embed everything before touching the previous index.
        let embedder = Arc::clone(&self.embedder);
        let batch_size = self.config.embeddings.batch_size.max(1);
        let vectors: Vec<Vec<f32>> = stream::iter(retained.chunks(batch_size))
            .then(|batch| {
                let embedder = Arc::clone(&embedder);
                let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
                async move { embedder.embed_batch(&texts).await }
            })
            .try_concat()
            .await?;

        let index = SimilarityIndex::create(IndexOptions {
            dimensions: self.embedder.dimensions(),
            space: DistanceSpace::Cosine,
            persist_dir: self.config.index.persist_dir.clone(),
            collection: self.config.index.collection.clone(),
        })?;

        for (chunk, vector) in retained.iter().zip(vectors) {
            index.insert(VectorEntry {
                id: chunk.chunk_id,
                vector,
                metadata: chunk.to_index_metadata(),
            })?;
        }
        index.persist()?;

        tracing::info!(entries = index.len(), collection = %self.config.index.collection, "index built");
        Ok(index)
    }

    /// Whether a section title matches any excluded marker
    /// (case-insensitive containment)
    fn is_excluded(&self, section: &str) -> bool {
        let section = section.to_uppercase();
        self.config
            .index
            .excluded_sections
            .iter()
            .any(|marker| section.contains(&marker.to_uppercase()))
    }
}
