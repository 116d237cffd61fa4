//! Query engine: the context object built once at startup
//!
//! Holds the opened index, the embedding provider, and the synthesis mode,
//! and serves questions without any per-request global state. Safe to share
//! behind an `Arc` across concurrent queries: the index is immutable once
//! opened.

use std::collections::HashSet;
use std::sync::Arc;

use medrag_index::SimilarityIndex;

use crate::config::RagConfig;
use crate::error::Error;
use crate::generation::answer::{AnswerSynthesizer, SynthesisMode};
use crate::generation::prompt::NOT_AVAILABLE;
use crate::providers::EmbeddingProvider;
use crate::retrieval::{RetrievalOutcome, Retriever};
use crate::types::{QueryRequest, QueryResponse, StatsSnapshot};

/// Answer returned while no index has been built yet
pub const NOT_INITIALIZED: &str =
    "The document index is not initialized. Run the build pipeline first.";

/// The query-phase context object
pub struct RagEngine {
    config: RagConfig,
    index: Option<Arc<SimilarityIndex>>,
    retriever: Option<Retriever>,
    embedder: Arc<dyn EmbeddingProvider>,
    synthesizer: AnswerSynthesizer,
}

impl RagEngine {
    /// Open the persisted index and assemble the engine.
    ///
    /// A missing index directory is not fatal: the engine starts
    /// uninitialized and answers every question with [`NOT_INITIALIZED`]
    /// until a build has run.
    pub fn open(
        config: RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        mode: SynthesisMode,
    ) -> crate::error::Result<Self> {
        let index = if SimilarityIndex::exists(&config.index.persist_dir, &config.index.collection)
        {
            let index = SimilarityIndex::open(&config.index.persist_dir, &config.index.collection)?;
            tracing::info!(
                collection = %config.index.collection,
                chunks = index.len(),
                "index loaded"
            );
            Some(Arc::new(index))
        } else {
            tracing::warn!(
                dir = %config.index.persist_dir.display(),
                "index collection not found; engine starts uninitialized"
            );
            None
        };

        let retriever = index.as_ref().map(|index| {
            Retriever::new(
                Arc::clone(index),
                Arc::clone(&embedder),
                config.retrieval.clone(),
            )
        });

        Ok(Self {
            config,
            index,
            retriever,
            embedder,
            synthesizer: AnswerSynthesizer::new(mode),
        })
    }

    /// Whether a built index is loaded
    pub fn is_initialized(&self) -> bool {
        self.index.is_some()
    }

    /// Engine configuration
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Answer one question.
    ///
    /// Blank questions are rejected before any retrieval; capability
    /// failures are converted into `success: false` responses rather than
    /// propagated.
    pub async fn answer(&self, request: &QueryRequest) -> QueryResponse {
        if request.question.trim().is_empty() {
            return QueryResponse::failure(Error::EmptyQuestion.to_string());
        }

        let Some(retriever) = &self.retriever else {
            return QueryResponse::answered(NOT_INITIALIZED.to_string(), Vec::new());
        };

        let k = request.top_k.unwrap_or(self.config.retrieval.default_k);

        match retriever.retrieve(&request.question, k).await {
            Ok(RetrievalOutcome::NoInformation) => {
                QueryResponse::answered(NOT_AVAILABLE.to_string(), Vec::new())
            }
            Ok(RetrievalOutcome::Found(retrieval)) => {
                match self.synthesizer.synthesize(&request.question, &retrieval).await {
                    Ok(answer) => {
                        QueryResponse::answered(answer, retrieval.context.sources.clone())
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "answer synthesis failed");
                        QueryResponse::failure(e.to_string())
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "retrieval failed");
                QueryResponse::failure(e.to_string())
            }
        }
    }

    /// Read-only snapshot of corpus size and active capabilities
    pub fn stats(&self) -> StatsSnapshot {
        let (document_count, chunk_count) = match &self.index {
            Some(index) => {
                let documents = index.with_entries(|entries| {
                    entries
                        .iter()
                        .filter_map(|e| e.metadata.get("document_id").and_then(|v| v.as_str()))
                        .collect::<HashSet<_>>()
                        .len()
                });
                (documents, index.len())
            }
            None => (0, 0),
        };

        StatsSnapshot {
            document_count,
            chunk_count,
            generation_model: self.synthesizer.mode().model_name().to_string(),
            embedding_model: self.embedder.model().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::index::IndexBuilder;
    use crate::types::{Chunk, ChunkMeta};
    use async_trait::async_trait;
    use std::path::Path;

    /// Deterministic unit-length embeddings from a tiny content hash
    struct HashEmbedder;

    #[async_trait]
    impl EmbeddingProvider for HashEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let sum: u32 = text.bytes().map(u32::from).sum();
            let mut v = vec![
                1.0,
                (sum % 97) as f32 / 97.0,
                (sum % 31) as f32 / 31.0,
            ];
            let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            v.iter_mut().for_each(|x| *x /= norm);
            Ok(v)
        }

        fn dimensions(&self) -> usize {
            3
        }

        fn model(&self) -> &str {
            "hash-embed"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "hash"
        }
    }

    /// Must never be called: guards the reject-before-retrieval contract
    struct PanickingEmbedder;

    #[async_trait]
    impl EmbeddingProvider for PanickingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            panic!("embedding must not run for rejected questions");
        }

        fn dimensions(&self) -> usize {
            3
        }

        fn model(&self) -> &str {
            "panicking-embed"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    fn chunk(id: u64, content: &str, document_id: &str) -> Chunk {
        Chunk {
            chunk_id: id,
            content: content.to_string(),
            metadata: ChunkMeta {
                document_id: document_id.to_string(),
                source: format!("{}.pdf", document_id),
                section: "TREATMENT".to_string(),
                domain: "Oncology".to_string(),
                language: "en".to_string(),
            },
        }
    }

    fn test_config(dir: &Path) -> RagConfig {
        let mut config = RagConfig::default();
        config.index.persist_dir = dir.to_path_buf();
        config
    }

    async fn built_engine(dir: &Path, mode: SynthesisMode) -> RagEngine {
        let config = test_config(dir);
        let embedder = Arc::new(HashEmbedder);
        let builder = IndexBuilder::new(embedder.clone(), &config);
        builder
            .build(&[
                chunk(0, "Surgery is usually the first treatment.", "who_guidelines"),
                chunk(1, "Radiotherapy often follows surgery.", "who_guidelines"),
                chunk(2, "Screening uses mammography.", "nci_overview"),
            ])
            .await
            .unwrap();

        RagEngine::open(config, embedder, mode).unwrap()
    }

    #[tokio::test]
    async fn empty_question_is_rejected_before_retrieval() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = RagEngine::open(
            test_config(tmp.path()),
            Arc::new(PanickingEmbedder),
            SynthesisMode::Simulation,
        )
        .unwrap();

        let response = engine.answer(&QueryRequest::new("   ")).await;
        assert!(!response.success);
        assert!(response.error.is_some());
        assert!(response.sources.is_empty());
    }

    #[tokio::test]
    async fn missing_index_degrades_to_not_initialized() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = RagEngine::open(
            test_config(tmp.path()),
            Arc::new(HashEmbedder),
            SynthesisMode::Simulation,
        )
        .unwrap();

        assert!(!engine.is_initialized());
        let response = engine.answer(&QueryRequest::new("What is screening?")).await;
        assert!(response.success);
        assert_eq!(response.answer, NOT_INITIALIZED);
        assert!(response.sources.is_empty());
    }

    #[tokio::test]
    async fn simulation_answer_is_labeled_and_cites_sources() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = built_engine(tmp.path(), SynthesisMode::Simulation).await;

        let response = engine
            .answer(&QueryRequest::new("What is the first treatment?"))
            .await;

        assert!(response.success);
        assert!(response.answer.starts_with("[SIMULATION MODE]"));
        assert!(!response.sources.is_empty());
    }

    #[tokio::test]
    async fn stats_report_corpus_and_models() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = built_engine(tmp.path(), SynthesisMode::Simulation).await;

        let stats = engine.stats();
        assert_eq!(stats.chunk_count, 3);
        assert_eq!(stats.document_count, 2);
        assert_eq!(stats.generation_model, "simulation");
        assert_eq!(stats.embedding_model, "hash-embed");
    }

    #[tokio::test]
    async fn uninitialized_stats_are_zeroed() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = RagEngine::open(
            test_config(tmp.path()),
            Arc::new(HashEmbedder),
            SynthesisMode::Simulation,
        )
        .unwrap();

        let stats = engine.stats();
        assert_eq!(stats.chunk_count, 0);
        assert_eq!(stats.document_count, 0);
    }
}
