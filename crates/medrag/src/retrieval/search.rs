//! Nearest-neighbor retrieval and bounded context assembly

use std::sync::Arc;

use medrag_index::SimilarityIndex;

use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::providers::EmbeddingProvider;
use crate::types::Chunk;

/// Separator between labeled chunks in the assembled context
const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// A retrieved chunk with its similarity score
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Cosine similarity to the query (higher is better)
    pub similarity: f32,
}

/// Bounded context assembled from retrieval results
#[derive(Debug, Clone)]
pub struct AnswerContext {
    /// Labeled, truncated chunk texts joined with a visible separator
    pub content: String,
    /// Deduplicated source names, first-occurrence order
    pub sources: Vec<String>,
}

/// Results plus the context assembled from them
#[derive(Debug, Clone)]
pub struct Retrieval {
    /// Retrieved chunks, descending similarity
    pub results: Vec<ScoredChunk>,
    /// Assembled context
    pub context: AnswerContext,
}

/// Outcome of a retrieval round trip
#[derive(Debug, Clone)]
pub enum RetrievalOutcome {
    /// At least one chunk was found
    Found(Retrieval),
    /// The index returned nothing
    NoInformation,
}

/// Embeds questions and assembles bounded answer contexts from the index
pub struct Retriever {
    index: Arc<SimilarityIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    config: RetrievalConfig,
}

impl Retriever {
    /// Create a retriever over an opened index
    pub fn new(
        index: Arc<SimilarityIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            index,
            embedder,
            config,
        }
    }

    /// Clamp a requested retrieval breadth to the configured range
    pub fn clamp_k(&self, k: usize) -> usize {
        k.clamp(1, self.config.max_k)
    }

    /// Retrieve the `k` most similar chunks for a question and assemble the
    /// answer context. Returns at most `min(k, index size)` results.
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<RetrievalOutcome> {
        let k = self.clamp_k(k);
        let query_embedding = self.embedder.embed(question).await?;

        let hits = self.index.search(&query_embedding, k)?;
        if hits.is_empty() {
            return Ok(RetrievalOutcome::NoInformation);
        }

        let results: Vec<ScoredChunk> = hits
            .into_iter()
            .map(|hit| ScoredChunk {
                chunk: Chunk::from_index_metadata(hit.id, &hit.metadata),
                similarity: hit.score,
            })
            .collect();

        tracing::debug!(
            results = results.len(),
            top_score = results.first().map(|r| r.similarity).unwrap_or(0.0),
            "retrieved chunks"
        );

        let context = self.assemble_context(&results);
        Ok(RetrievalOutcome::Found(Retrieval { results, context }))
    }

    /// Build the labeled, truncated, deduplicated context
    fn assemble_context(&self, results: &[ScoredChunk]) -> AnswerContext {
        let mut parts = Vec::with_capacity(results.len());
        let mut sources: Vec<String> = Vec::new();

        for (i, result) in results.iter().enumerate() {
            let source = &result.chunk.metadata.source;
            let content = truncate_chars(&result.chunk.content, self.config.max_chars_per_doc);

            parts.push(format!("[Source {}: {}]\n{}", i + 1, source, content));

            if !sources.iter().any(|s| s == source) {
                sources.push(source.clone());
            }
        }

        AnswerContext {
            content: parts.join(CONTEXT_SEPARATOR),
            sources,
        }
    }
}

/// Truncate to at most `max_chars` characters on a char boundary
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
