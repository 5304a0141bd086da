//! Embedding storage operations
//!
//! Stores embeddings as little-endian f32 BLOBs keyed by chunk id.

use super::Database;
use crate::error::{LexRagError, Result};
use chrono::Utc;
use rusqlite::params;

/// Corpus entry for retrieval: one stored chunk embedding
#[derive(Debug, Clone)]
pub struct StoredEmbedding {
    pub chunk_id: i64,
    pub doc_id: i64,
    pub embedding: Vec<f32>,
}

impl Database {
    /// Insert embedding for a chunk
    pub fn insert_embedding(&self, chunk_id: i64, model: &str, embedding: &[f32]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let embedding_bytes = embedding_to_bytes(embedding);
        self.conn.execute(
            "INSERT OR REPLACE INTO embeddings (chunk_id, model, embedding, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![chunk_id, model, embedding_bytes, now],
        )?;
        Ok(())
    }

    /// Check whether any embeddings are stored
    pub fn has_embeddings(&self) -> bool {
        self.conn
            .query_row("SELECT COUNT(*) FROM embeddings", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count > 0)
            .unwrap_or(false)
    }

    /// Load all embeddings for active documents, in chunk insertion order
    pub fn get_all_embeddings(&self) -> Result<Vec<StoredEmbedding>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.chunk_id, c.doc_id, e.embedding
             FROM embeddings e
             JOIN chunks c ON c.id = e.chunk_id
             JOIN documents d ON d.id = c.doc_id AND d.active = 1
             ORDER BY e.chunk_id",
        )?;

        let results = stmt
            .query_map([], |row| {
                let chunk_id: i64 = row.get(0)?;
                let doc_id: i64 = row.get(1)?;
                let embedding_bytes: Vec<u8> = row.get(2)?;
                Ok(StoredEmbedding {
                    chunk_id,
                    doc_id,
                    embedding: bytes_to_embedding(&embedding_bytes),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(results)
    }

    /// Register model with its dimensions, failing on a dimension change
    pub fn register_model(&self, model: &str, dimensions: usize) -> Result<()> {
        let now = Utc::now().to_rfc3339();

        if let Some(stored) = self.get_model_dimensions(model)? {
            if stored != dimensions {
                return Err(LexRagError::DimensionMismatch {
                    expected: stored,
                    actual: dimensions,
                });
            }
            self.conn.execute(
                "UPDATE model_metadata SET last_used_at = ?2 WHERE model = ?1",
                params![model, now],
            )?;
            return Ok(());
        }

        self.conn.execute(
            "INSERT INTO model_metadata (model, dimensions, created_at, last_used_at)
             VALUES (?1, ?2, ?3, ?3)",
            params![model, dimensions as i64, now],
        )?;
        Ok(())
    }

    /// Get registered dimensions for a model
    pub fn get_model_dimensions(&self, model: &str) -> Result<Option<usize>> {
        let result = self.conn.query_row(
            "SELECT dimensions FROM model_metadata WHERE model = ?1",
            params![model],
            |row| row.get::<_, i64>(0),
        );
        match result {
            Ok(dims) => Ok(Some(dims as usize)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get dimensions of the stored corpus, if any model is registered
    pub fn get_corpus_dimensions(&self) -> Result<Option<usize>> {
        let result = self.conn.query_row(
            "SELECT dimensions FROM model_metadata ORDER BY last_used_at DESC LIMIT 1",
            [],
            |row| row.get::<_, i64>(0),
        );
        match result {
            Ok(dims) => Ok(Some(dims as usize)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Cleanup embeddings for chunks that no longer exist
    pub fn cleanup_orphaned_embeddings(&self) -> Result<usize> {
        let rows = self.conn.execute(
            "DELETE FROM embeddings WHERE chunk_id NOT IN (SELECT id FROM chunks)",
            [],
        )?;
        Ok(rows)
    }
}

/// Convert f32 embedding to little-endian bytes
pub fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes to f32 embedding
pub fn bytes_to_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}
