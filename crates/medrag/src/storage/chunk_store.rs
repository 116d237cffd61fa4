//! Chunk id assignment and collection persistence

use std::path::Path;

use crate::error::{Error, Result};
use crate::ingestion::chunker::SectionChunk;
use crate::types::Chunk;

/// Assigns corpus-wide chunk ids and persists the collection as JSON.
///
/// Ids are handed out in the exact order chunks were produced, so an
/// unchanged corpus and configuration reproduce an identical collection.
pub struct ChunkStore;

impl ChunkStore {
    /// Assign sequential ids to section chunks in production order
    pub fn assign_ids(pieces: Vec<SectionChunk>) -> Vec<Chunk> {
        pieces
            .into_iter()
            .enumerate()
            .map(|(i, piece)| Chunk {
                chunk_id: i as u64,
                content: piece.content,
                metadata: piece.metadata,
            })
            .collect()
    }

    /// Write the full collection to a JSON file
    pub fn save(path: &Path, chunks: &[Chunk]) -> Result<()> {
        debug_assert!(
            chunks.windows(2).all(|w| w[0].chunk_id < w[1].chunk_id),
            "chunk ids must be strictly increasing"
        );

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(chunks)?;
        std::fs::write(path, json)?;

        tracing::info!(chunks = chunks.len(), path = %path.display(), "chunk collection saved");
        Ok(())
    }

    /// Load a collection, verifying the id invariant
    pub fn load(path: &Path) -> Result<Vec<Chunk>> {
        let raw = std::fs::read_to_string(path)?;
        let chunks: Vec<Chunk> = serde_json::from_str(&raw)?;

        if !chunks.windows(2).all(|w| w[0].chunk_id < w[1].chunk_id) {
            return Err(Error::config(format!(
                "chunk collection at {} has non-increasing chunk ids",
                path.display()
            )));
        }

        Ok(chunks)
    }
}
