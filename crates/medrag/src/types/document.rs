//! Document, section, and chunk types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Corpus metadata attached to a document and inherited by everything
/// derived from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMeta {
    /// Stable document identifier (file stem)
    pub document_id: String,
    /// Source name shown in answer attributions (file name)
    pub source: String,
    /// Domain tag (e.g. "Oncology")
    pub domain: String,
    /// Language tag (e.g. "en")
    pub language: String,
}

/// A raw document produced by the loader; build-phase only, never persisted
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Corpus metadata
    pub meta: DocMeta,
    /// Full normalized text
    pub text: String,
    /// Page count when the loader knows it
    pub page_count: Option<u32>,
}

impl RawDocument {
    /// Create a new raw document
    pub fn new(meta: DocMeta, text: String, page_count: Option<u32>) -> Self {
        Self {
            meta,
            text,
            page_count,
        }
    }
}

/// A titled section of a document, in reading order
#[derive(Debug, Clone)]
pub struct Section {
    /// First line of the segment, trimmed
    pub title: String,
    /// Remaining lines
    pub body: String,
    /// Metadata inherited from the parent document
    pub meta: DocMeta,
}

impl Section {
    /// Section text with the structural marker restored, so a further split
    /// still sees the heading cue
    pub fn text(&self) -> String {
        format!(
            "{} {}\n{}",
            crate::ingestion::sections::SECTION_MARKER,
            self.title,
            self.body
        )
    }
}

/// Metadata carried by every chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMeta {
    /// Parent document identifier
    pub document_id: String,
    /// Source name for attribution
    pub source: String,
    /// Title of the section the chunk came from
    pub section: String,
    /// Domain tag
    pub domain: String,
    /// Language tag
    pub language: String,
}

impl ChunkMeta {
    /// Derive chunk metadata from document metadata and a section title
    pub fn from_doc(meta: &DocMeta, section: &str) -> Self {
        Self {
            document_id: meta.document_id.clone(),
            source: meta.source.clone(),
            section: section.to_string(),
            domain: meta.domain.clone(),
            language: meta.language.clone(),
        }
    }
}

/// The atomic retrieval unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Corpus-wide id, strictly increasing in production order
    pub chunk_id: u64,
    /// Chunk text
    pub content: String,
    /// Inherited metadata
    pub metadata: ChunkMeta,
}

impl Chunk {
    /// Flatten the chunk into index-entry metadata so the query phase can
    /// reconstruct it from the index alone
    pub fn to_index_metadata(&self) -> HashMap<String, serde_json::Value> {
        let mut meta = HashMap::new();
        meta.insert("chunk_id".to_string(), serde_json::json!(self.chunk_id));
        meta.insert("content".to_string(), serde_json::json!(self.content));
        meta.insert(
            "document_id".to_string(),
            serde_json::json!(self.metadata.document_id),
        );
        meta.insert("source".to_string(), serde_json::json!(self.metadata.source));
        meta.insert(
            "section".to_string(),
            serde_json::json!(self.metadata.section),
        );
        meta.insert("domain".to_string(), serde_json::json!(self.metadata.domain));
        meta.insert(
            "language".to_string(),
            serde_json::json!(self.metadata.language),
        );
        meta
    }

    /// Rebuild a chunk from index-entry metadata
    pub fn from_index_metadata(id: u64, meta: &HashMap<String, serde_json::Value>) -> Self {
        let text_field = |key: &str| {
            meta.get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        Self {
            chunk_id: id,
            content: text_field("content"),
            metadata: ChunkMeta {
                document_id: text_field("document_id"),
                source: text_field("source"),
                section: text_field("section"),
                domain: text_field("domain"),
                language: text_field("language"),
            },
        }
    }
}
