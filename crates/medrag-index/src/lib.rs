//! medrag-index: persistent flat vector index with cosine similarity search.
//!
//! Stores `(id, vector, metadata)` entries for a named collection under a
//! persist directory and answers k-nearest-neighbor queries by descending
//! cosine similarity. Collections are rebuilt wholesale: creating a
//! collection destroys any previous state at the same location, and an open
//! index is read-only from the caller's perspective once built.

pub mod error;
pub mod index;

pub use error::{IndexError, Result};
pub use index::{
    DistanceSpace, IndexOptions, Manifest, SearchHit, SimilarityIndex, VectorEntry,
    SCHEMA_VERSION,
};
