//! Database statistics

use super::Database;
use crate::error::Result;

/// Store stats
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoreStats {
    pub document_count: usize,
    pub chunk_count: usize,
    pub embedded_count: usize,
    pub pending_embedding: usize,
    pub embedding_model: Option<String>,
    pub embedding_dimensions: Option<usize>,
}

impl Database {
    /// Get store statistics
    pub fn get_stats(&self) -> Result<StoreStats> {
        let document_count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE active = 1",
            [],
            |row| row.get(0),
        )?;

        let chunk_count = self.count_chunks()?;

        let embedded_count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM embeddings e
                 JOIN chunks c ON c.id = e.chunk_id
                 JOIN documents d ON d.id = c.doc_id AND d.active = 1",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        let model_row = self
            .conn
            .query_row(
                "SELECT model, dimensions FROM model_metadata ORDER BY last_used_at DESC LIMIT 1",
                [],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .ok();

        Ok(StoreStats {
            document_count: document_count as usize,
            chunk_count,
            embedded_count: embedded_count as usize,
            pending_embedding: chunk_count.saturating_sub(embedded_count as usize),
            embedding_model: model_row.as_ref().map(|(m, _)| m.clone()),
            embedding_dimensions: model_row.map(|(_, d)| d as usize),
        })
    }

    /// Vacuum the database
    pub fn vacuum(&self) -> Result<()> {
        self.conn.execute("VACUUM", [])?;
        Ok(())
    }

    /// Cleanup orphaned chunks (belonging to inactive documents)
    pub fn cleanup_orphaned_chunks(&self) -> Result<usize> {
        self.begin_immediate()?;
        let result: Result<usize> = (|| {
            self.conn.execute(
                "DELETE FROM embeddings WHERE chunk_id IN (
                    SELECT c.id FROM chunks c
                    JOIN documents d ON d.id = c.doc_id
                    WHERE d.active = 0
                 )",
                [],
            )?;
            let rows = self.conn.execute(
                "DELETE FROM chunks WHERE doc_id IN
                 (SELECT id FROM documents WHERE active = 0)",
                [],
            )?;
            self.conn
                .execute("DELETE FROM documents WHERE active = 0", [])?;
            Ok(rows)
        })();

        match result {
            Ok(rows) => {
                self.commit()?;
                Ok(rows)
            }
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::db::documents::hash_content;
    use crate::db::Database;

    #[test]
    fn test_stats_on_empty_store() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let stats = db.get_stats().unwrap();
        assert_eq!(stats.document_count, 0);
        assert_eq!(stats.chunk_count, 0);
        assert!(stats.embedding_model.is_none());
    }

    #[test]
    fn test_stats_counts_pending() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        let hash = hash_content("body");
        db.insert_content(&hash, "body").unwrap();
        let doc_id = db
            .insert_document("a.pdf", "A", &hash, 1, "pdf")
            .unwrap();
        let c0 = db.insert_chunk(doc_id, 0, "x", 1, 1, "h0").unwrap();
        db.insert_chunk(doc_id, 1, "y", 1, 1, "h1").unwrap();
        db.insert_embedding(c0, "minilm", &[1.0]).unwrap();

        let stats = db.get_stats().unwrap();
        assert_eq!(stats.document_count, 1);
        assert_eq!(stats.chunk_count, 2);
        assert_eq!(stats.embedded_count, 1);
        assert_eq!(stats.pending_embedding, 1);
    }

    #[test]
    fn test_cleanup_removes_inactive() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        let hash = hash_content("body");
        db.insert_content(&hash, "body").unwrap();
        let doc_id = db
            .insert_document("a.pdf", "A", &hash, 1, "pdf")
            .unwrap();
        let chunk_id = db.insert_chunk(doc_id, 0, "x", 1, 1, "h0").unwrap();
        db.insert_embedding(chunk_id, "minilm", &[1.0]).unwrap();
        db.deactivate_document(doc_id).unwrap();

        db.cleanup_orphaned_chunks().unwrap();
        db.cleanup_orphaned_content().unwrap();

        let stats = db.get_stats().unwrap();
        assert_eq!(stats.document_count, 0);
        assert_eq!(stats.chunk_count, 0);
    }
}
