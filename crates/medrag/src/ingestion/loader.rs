//! Plain-text corpus loading
//!
//! Rich-format extraction (PDF and friends) belongs to an external document
//! loader; this loader covers the plain-text and markdown files such a
//! loader would hand over, and attaches the corpus metadata every document
//! carries.

use std::path::PathBuf;

use walkdir::WalkDir;

use crate::config::IngestConfig;
use crate::error::{Error, Result};
use crate::types::{DocMeta, RawDocument};

const TEXT_EXTENSIONS: [&str; 3] = ["txt", "md", "markdown"];

/// Loads corpus documents from a data directory
pub struct TextLoader {
    data_dir: PathBuf,
    domain: String,
    language: String,
}

impl TextLoader {
    /// Create a loader from the ingestion configuration
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            domain: config.domain.clone(),
            language: config.language.clone(),
        }
    }

    /// Load every supported file under the data directory, in a stable
    /// path order so repeated runs see the same corpus sequence.
    pub fn load(&self) -> Result<Vec<RawDocument>> {
        if !self.data_dir.exists() {
            return Err(Error::config(format!(
                "data directory not found: {}",
                self.data_dir.display()
            )));
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(&self.data_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| TEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let text = std::fs::read_to_string(&path)?;

            let document_id = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let source = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            tracing::debug!(document_id = %document_id, "loaded document");

            documents.push(RawDocument::new(
                DocMeta {
                    document_id,
                    source,
                    domain: self.domain.clone(),
                    language: self.language.clone(),
                },
                text,
                None,
            ));
        }

        if documents.is_empty() {
            tracing::warn!(dir = %self.data_dir.display(), "no corpus documents found");
        }

        Ok(documents)
    }
}
