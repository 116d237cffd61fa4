//! Flat vector index with directory persistence

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

/// Schema version written into every collection manifest
pub const SCHEMA_VERSION: &str = "1";

const MANIFEST_FILE: &str = "manifest.json";
const ENTRIES_FILE: &str = "entries.json";

/// Distance space used for similarity scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceSpace {
    /// Cosine similarity (higher is more similar)
    Cosine,
}

/// Options for creating a collection
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Vector dimensions
    pub dimensions: usize,
    /// Distance space
    pub space: DistanceSpace,
    /// Directory holding all collections
    pub persist_dir: PathBuf,
    /// Collection name (subdirectory under `persist_dir`)
    pub collection: String,
}

/// Collection manifest, persisted alongside the entries for provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Collection name
    pub collection: String,
    /// Vector dimensions
    pub dimensions: usize,
    /// Distance space
    pub space: DistanceSpace,
    /// Schema version of the on-disk layout
    pub schema_version: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A single indexed vector with its payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorEntry {
    /// Caller-assigned entry id
    pub id: u64,
    /// Embedding vector
    pub vector: Vec<f32>,
    /// Arbitrary payload returned with search hits
    pub metadata: HashMap<String, serde_json::Value>,
}

/// A search match
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Entry id
    pub id: u64,
    /// Similarity score (cosine: 1.0 identical, -1.0 opposite)
    pub score: f32,
    /// Payload stored with the entry
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Flat vector index for one collection.
///
/// Entries are kept in insertion order; search results with equal scores
/// preserve that order (the sort is stable).
#[derive(Debug)]
pub struct SimilarityIndex {
    manifest: Manifest,
    dir: PathBuf,
    entries: RwLock<Vec<VectorEntry>>,
    seen_ids: RwLock<HashSet<u64>>,
}

impl SimilarityIndex {
    /// Create a fresh collection, destroying any existing one at the same
    /// location. The manifest is written immediately; entries are written by
    /// [`SimilarityIndex::persist`].
    pub fn create(options: IndexOptions) -> Result<Self> {
        let dir = options.persist_dir.join(&options.collection);

        if dir.exists() {
            tracing::info!(collection = %options.collection, "removing previous index");
            fs::remove_dir_all(&dir)?;
        }
        fs::create_dir_all(&dir)?;

        let manifest = Manifest {
            collection: options.collection,
            dimensions: options.dimensions,
            space: options.space,
            schema_version: SCHEMA_VERSION.to_string(),
            created_at: Utc::now(),
        };

        let manifest_json = serde_json::to_string_pretty(&manifest)?;
        fs::write(dir.join(MANIFEST_FILE), manifest_json)?;

        Ok(Self {
            manifest,
            dir,
            entries: RwLock::new(Vec::new()),
            seen_ids: RwLock::new(HashSet::new()),
        })
    }

    /// Open an existing collection
    pub fn open(persist_dir: &Path, collection: &str) -> Result<Self> {
        let dir = persist_dir.join(collection);
        let manifest_path = dir.join(MANIFEST_FILE);

        if !manifest_path.exists() {
            return Err(IndexError::CollectionNotFound(dir));
        }

        let manifest: Manifest = serde_json::from_str(&fs::read_to_string(&manifest_path)?)?;
        if manifest.schema_version != SCHEMA_VERSION {
            return Err(IndexError::UnsupportedSchema(manifest.schema_version));
        }

        let entries_path = dir.join(ENTRIES_FILE);
        let entries: Vec<VectorEntry> = if entries_path.exists() {
            serde_json::from_str(&fs::read_to_string(&entries_path)?)?
        } else {
            Vec::new()
        };

        let seen_ids = entries.iter().map(|e| e.id).collect();

        tracing::debug!(
            collection = %manifest.collection,
            entries = entries.len(),
            "opened index"
        );

        Ok(Self {
            manifest,
            dir,
            entries: RwLock::new(entries),
            seen_ids: RwLock::new(seen_ids),
        })
    }

    /// Check whether a collection exists at the given location
    pub fn exists(persist_dir: &Path, collection: &str) -> bool {
        persist_dir.join(collection).join(MANIFEST_FILE).exists()
    }

    /// Remove a collection from disk, if present
    pub fn destroy(persist_dir: &Path, collection: &str) -> Result<()> {
        let dir = persist_dir.join(collection);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        Ok(())
    }

    /// Insert a single entry
    pub fn insert(&self, entry: VectorEntry) -> Result<()> {
        if entry.vector.len() != self.manifest.dimensions {
            return Err(IndexError::DimensionMismatch {
                expected: self.manifest.dimensions,
                got: entry.vector.len(),
            });
        }

        let mut seen = self.seen_ids.write();
        if !seen.insert(entry.id) {
            return Err(IndexError::DuplicateId(entry.id));
        }
        self.entries.write().push(entry);
        Ok(())
    }

    /// Insert entries in order
    pub fn insert_batch(&self, entries: Vec<VectorEntry>) -> Result<()> {
        for entry in entries {
            self.insert(entry)?;
        }
        Ok(())
    }

    /// Write the current entries to disk
    pub fn persist(&self) -> Result<()> {
        let entries = self.entries.read();
        let json = serde_json::to_string(&*entries)?;
        fs::write(self.dir.join(ENTRIES_FILE), json)?;
        tracing::debug!(entries = entries.len(), "persisted index entries");
        Ok(())
    }

    /// Return the `k` entries nearest to `query`, sorted by descending
    /// similarity. Ties keep insertion order. Returns fewer than `k` hits
    /// when the collection is smaller than `k`.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.manifest.dimensions {
            return Err(IndexError::DimensionMismatch {
                expected: self.manifest.dimensions,
                got: query.len(),
            });
        }

        let entries = self.entries.read();
        let mut hits: Vec<SearchHit> = entries
            .iter()
            .map(|e| SearchHit {
                id: e.id,
                score: cosine_similarity(query, &e.vector),
                metadata: e.metadata.clone(),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);

        Ok(hits)
    }

    /// Run a closure over the entries without cloning them
    pub fn with_entries<R>(&self, f: impl FnOnce(&[VectorEntry]) -> R) -> R {
        f(&self.entries.read())
    }

    /// Number of entries in the collection
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the collection has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Collection manifest
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

/// Cosine similarity between two vectors of equal length.
///
/// Zero-norm vectors score 0.0 against everything.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(dir: &Path) -> IndexOptions {
        IndexOptions {
            dimensions: 3,
            space: DistanceSpace::Cosine,
            persist_dir: dir.to_path_buf(),
            collection: "test_docs".to_string(),
        }
    }

    fn entry(id: u64, vector: Vec<f32>) -> VectorEntry {
        let mut metadata = HashMap::new();
        metadata.insert("chunk_id".to_string(), serde_json::json!(id));
        VectorEntry {
            id,
            vector,
            metadata,
        }
    }

    #[test]
    fn search_orders_by_descending_similarity() {
        let tmp = tempfile::tempdir().unwrap();
        let index = SimilarityIndex::create(options(tmp.path())).unwrap();

        index.insert(entry(0, vec![0.0, 1.0, 0.0])).unwrap();
        index.insert(entry(1, vec![1.0, 0.0, 0.0])).unwrap();
        index.insert(entry(2, vec![0.7, 0.7, 0.0])).unwrap();

        let hits = index.search(&[1.0, 0.0, 0.0], 3).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].id, 1);
        assert_eq!(hits[1].id, 2);
        assert_eq!(hits[2].id, 0);
        assert!(hits[0].score >= hits[1].score && hits[1].score >= hits[2].score);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let tmp = tempfile::tempdir().unwrap();
        let index = SimilarityIndex::create(options(tmp.path())).unwrap();

        // Identical vectors score identically against any query.
        index.insert(entry(10, vec![1.0, 0.0, 0.0])).unwrap();
        index.insert(entry(11, vec![1.0, 0.0, 0.0])).unwrap();
        index.insert(entry(12, vec![1.0, 0.0, 0.0])).unwrap();

        let hits = index.search(&[1.0, 0.0, 0.0], 3).unwrap();
        let ids: Vec<u64> = hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn search_returns_at_most_collection_size() {
        let tmp = tempfile::tempdir().unwrap();
        let index = SimilarityIndex::create(options(tmp.path())).unwrap();

        index.insert(entry(0, vec![1.0, 0.0, 0.0])).unwrap();
        index.insert(entry(1, vec![0.0, 1.0, 0.0])).unwrap();

        let hits = index.search(&[1.0, 1.0, 0.0], 5).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn persist_and_open_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let index = SimilarityIndex::create(options(tmp.path())).unwrap();
            index.insert(entry(0, vec![1.0, 0.0, 0.0])).unwrap();
            index.insert(entry(1, vec![0.0, 1.0, 0.0])).unwrap();
            index.persist().unwrap();
        }

        let reopened = SimilarityIndex::open(tmp.path(), "test_docs").unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.manifest().dimensions, 3);
        assert_eq!(reopened.manifest().schema_version, SCHEMA_VERSION);

        let hits = reopened.search(&[0.0, 1.0, 0.0], 1).unwrap();
        assert_eq!(hits[0].id, 1);
        assert_eq!(
            hits[0].metadata.get("chunk_id"),
            Some(&serde_json::json!(1))
        );
    }

    #[test]
    fn create_wipes_previous_collection() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let index = SimilarityIndex::create(options(tmp.path())).unwrap();
            index.insert(entry(0, vec![1.0, 0.0, 0.0])).unwrap();
            index.persist().unwrap();
        }

        let rebuilt = SimilarityIndex::create(options(tmp.path())).unwrap();
        assert!(rebuilt.is_empty());

        // The old entries file must be gone, not merely shadowed.
        let reopened = SimilarityIndex::open(tmp.path(), "test_docs").unwrap();
        assert_eq!(reopened.len(), 0);
    }

    #[test]
    fn open_missing_collection_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let err = SimilarityIndex::open(tmp.path(), "nope").unwrap_err();
        assert!(matches!(err, IndexError::CollectionNotFound(_)));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let index = SimilarityIndex::create(options(tmp.path())).unwrap();

        index.insert(entry(7, vec![1.0, 0.0, 0.0])).unwrap();
        let err = index.insert(entry(7, vec![0.0, 1.0, 0.0])).unwrap_err();
        assert!(matches!(err, IndexError::DuplicateId(7)));
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let index = SimilarityIndex::create(options(tmp.path())).unwrap();

        let err = index.insert(entry(0, vec![1.0, 0.0])).unwrap_err();
        assert!(matches!(
            err,
            IndexError::DimensionMismatch {
                expected: 3,
                got: 2
            }
        ));
    }
}
