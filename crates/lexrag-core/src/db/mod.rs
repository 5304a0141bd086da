//! Storage layer for lexrag
//!
//! SQLite-backed vector store with:
//! - Content-addressable document storage (SHA-256)
//! - Chunk rows whose rowid doubles as insertion order
//! - Embedding BLOBs with model dimension validation

mod chunks;
mod documents;
mod schema;
mod stats;
pub mod vectors;

pub use chunks::ChunkDetails;
pub use documents::{hash_content, Document};
pub use schema::Database;
pub use stats::StoreStats;
pub use vectors::StoredEmbedding;

use std::path::PathBuf;

impl Database {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CACHE_DIR_NAME)
            .join("index.sqlite")
    }
}
