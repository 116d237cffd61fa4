//! Persistence for the chunk collection

pub mod chunk_store;

pub use chunk_store::ChunkStore;
