//! Chunk storage operations

use super::Database;
use crate::error::Result;
use chrono::Utc;
use rusqlite::params;

/// Chunk record with citation metadata, joined against its document
#[derive(Debug, Clone)]
pub struct ChunkDetails {
    pub chunk_id: i64,
    pub doc_id: i64,
    pub doc_title: String,
    pub doc_path: String,
    pub seq: u32,
    pub text: String,
    pub page_start: usize,
    pub page_end: usize,
}

impl Database {
    /// Insert a chunk, returning its id (rowid = insertion order)
    pub fn insert_chunk(
        &self,
        doc_id: i64,
        seq: u32,
        text: &str,
        page_start: usize,
        page_end: usize,
        chunk_hash: &str,
    ) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO chunks (doc_id, seq, text, page_start, page_end, chunk_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                doc_id,
                seq,
                text,
                page_start as i64,
                page_end as i64,
                chunk_hash,
                now
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Fetch chunk text and citation metadata by id
    pub fn get_chunk_details(&self, chunk_id: i64) -> Result<ChunkDetails> {
        let result = self.conn.query_row(
            "SELECT c.id, c.doc_id, d.title, d.path, c.seq, c.text, c.page_start, c.page_end
             FROM chunks c
             JOIN documents d ON d.id = c.doc_id
             WHERE c.id = ?1",
            params![chunk_id],
            |row| {
                Ok(ChunkDetails {
                    chunk_id: row.get(0)?,
                    doc_id: row.get(1)?,
                    doc_title: row.get(2)?,
                    doc_path: row.get(3)?,
                    seq: row.get(4)?,
                    text: row.get(5)?,
                    page_start: row.get::<_, i64>(6)? as usize,
                    page_end: row.get::<_, i64>(7)? as usize,
                })
            },
        );
        match result {
            Ok(details) => Ok(details),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(
                crate::error::LexRagError::DocumentNotFound(format!("chunk {}", chunk_id)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// Get chunk ids for a document, in sequence order
    pub fn get_chunk_ids_for_document(&self, doc_id: i64) -> Result<Vec<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM chunks WHERE doc_id = ?1 ORDER BY seq")?;
        let results = stmt
            .query_map(params![doc_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(results)
    }

    /// Delete chunks (and their embeddings) for a document.
    ///
    /// Plain statements; callers needing atomicity with surrounding writes
    /// wrap this in their own transaction.
    pub fn delete_chunks_for_document(&self, doc_id: i64) -> Result<usize> {
        self.conn.execute(
            "DELETE FROM embeddings WHERE chunk_id IN
             (SELECT id FROM chunks WHERE doc_id = ?1)",
            params![doc_id],
        )?;
        let rows = self
            .conn
            .execute("DELETE FROM chunks WHERE doc_id = ?1", params![doc_id])?;
        Ok(rows)
    }

    /// Count all chunks for active documents
    pub fn count_chunks(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM chunks c
             JOIN documents d ON d.id = c.doc_id AND d.active = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
