//! Configuration for the RAG pipeline
//!
//! Every recognized option is an explicit field with a serde default, so a
//! partial TOML file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Document ingestion
    #[serde(default)]
    pub ingest: IngestConfig,
    /// Section chunking
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Embedding capability
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Generation capability
    #[serde(default)]
    pub llm: LlmConfig,
    /// Similarity index
    #[serde(default)]
    pub index: IndexConfig,
    /// Query-time retrieval
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Document ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Directory scanned for corpus documents
    pub data_dir: PathBuf,
    /// Output path for the persisted chunk collection
    pub chunks_path: PathBuf,
    /// Domain tag attached to every document
    pub domain: String,
    /// Language tag attached to every document
    pub language: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/rag_data"),
            chunks_path: PathBuf::from("chunks.json"),
            domain: "Oncology".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Section chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum section size in words; larger sections are split
    pub max_section_tokens: usize,
    /// Words repeated from the end of one sub-chunk at the start of the next
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_section_tokens: 400,
            chunk_overlap: 40,
        }
    }
}

/// Embedding capability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Ollama base URL serving the embedding model
    pub base_url: String,
    /// Embedding model name
    pub model: String,
    /// Embedding dimensions (768 for nomic-embed-text)
    pub dimensions: usize,
    /// Batch size for embedding generation during indexing
    pub batch_size: usize,
    /// Normalize vectors to unit length so cosine reduces to a dot product
    pub normalize: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            batch_size: 64,
            normalize: true,
            timeout_secs: 30,
        }
    }
}

/// Generation capability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL serving the generation model
    pub base_url: String,
    /// Generation model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum output length in tokens
    pub max_tokens: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2:3b".to_string(),
            temperature: 0.2,
            max_tokens: 600,
            timeout_secs: 120,
        }
    }
}

/// Similarity index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Directory holding index collections
    pub persist_dir: PathBuf,
    /// Collection name
    pub collection: String,
    /// Chunks whose section title contains any of these markers
    /// (case-insensitive) are not indexed
    pub excluded_sections: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        let persist_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("medrag")
            .join("index");

        Self {
            persist_dir,
            collection: "breast_cancer_docs".to_string(),
            excluded_sections: vec![
                "DOCUMENT TITLE".to_string(),
                "DOCUMENT SCOPE".to_string(),
            ],
        }
    }
}

/// Query-time retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Default number of chunks retrieved per question
    pub default_k: usize,
    /// Upper bound on retrieval breadth
    pub max_k: usize,
    /// Character budget per chunk in the assembled context
    pub max_chars_per_doc: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_k: 3,
            max_k: 8,
            max_chars_per_doc: 1200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_contract() {
        let config = RagConfig::default();
        assert_eq!(config.chunking.max_section_tokens, 400);
        assert_eq!(config.chunking.chunk_overlap, 40);
        assert_eq!(config.retrieval.default_k, 3);
        assert_eq!(config.retrieval.max_k, 8);
        assert_eq!(config.retrieval.max_chars_per_doc, 1200);
        assert!(config.embeddings.normalize);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let parsed: RagConfig = toml::from_str(
            r#"
            [chunking]
            max_section_tokens = 200
            chunk_overlap = 20

            [retrieval]
            default_k = 5
            max_k = 10
            max_chars_per_doc = 800
            "#,
        )
        .unwrap();

        assert_eq!(parsed.chunking.max_section_tokens, 200);
        assert_eq!(parsed.retrieval.default_k, 5);
        // Untouched sections keep their defaults.
        assert_eq!(parsed.embeddings.model, "nomic-embed-text");
        assert_eq!(parsed.llm.temperature, 0.2);
    }
}
