//! Document and content operations

use super::Database;
use crate::error::Result;
use chrono::Utc;
use rusqlite::params;
use sha2::{Digest, Sha256};

/// Hash content using SHA-256
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Document record from database
#[derive(Debug, Clone)]
pub struct Document {
    pub id: i64,
    pub path: String,
    pub title: String,
    pub hash: String,
    pub page_count: usize,
    pub source_type: String,
    pub created_at: String,
    pub modified_at: String,
    pub active: bool,
}

impl Database {
    /// Insert content if not exists (content-addressable)
    pub fn insert_content(&self, hash: &str, content: &str) -> Result<bool> {
        let now = Utc::now().to_rfc3339();
        let rows = self.conn.execute(
            "INSERT OR IGNORE INTO content (hash, doc, created_at) VALUES (?1, ?2, ?3)",
            params![hash, content, now],
        )?;
        Ok(rows > 0)
    }

    /// Insert new document, returning its id
    pub fn insert_document(
        &self,
        path: &str,
        title: &str,
        hash: &str,
        page_count: usize,
        source_type: &str,
    ) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO documents (path, title, hash, page_count, source_type, created_at, modified_at, active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6, 1)",
            params![path, title, hash, page_count as i64, source_type, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update existing document (new content hash)
    pub fn update_document(
        &self,
        id: i64,
        title: &str,
        hash: &str,
        page_count: usize,
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE documents SET title = ?2, hash = ?3, page_count = ?4, modified_at = ?5, active = 1
             WHERE id = ?1",
            params![id, title, hash, page_count as i64, now],
        )?;
        Ok(())
    }

    /// Find document by path
    pub fn find_document_by_path(&self, path: &str) -> Result<Option<Document>> {
        let result = self.conn.query_row(
            "SELECT id, path, title, hash, page_count, source_type, created_at, modified_at, active
             FROM documents WHERE path = ?1",
            params![path],
            row_to_document,
        );
        match result {
            Ok(doc) => Ok(Some(doc)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all active documents
    pub fn list_documents(&self) -> Result<Vec<Document>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, path, title, hash, page_count, source_type, created_at, modified_at, active
             FROM documents WHERE active = 1 ORDER BY id",
        )?;
        let results = stmt
            .query_map([], row_to_document)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(results)
    }

    /// Mark a document inactive (keeps content for cleanup pass)
    pub fn deactivate_document(&self, id: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE documents SET active = 0 WHERE id = ?1",
            params![id],
        )?;
        Ok(())
    }

    /// Delete orphaned content (not referenced by any active document)
    pub fn cleanup_orphaned_content(&self) -> Result<usize> {
        let rows = self.conn.execute(
            "DELETE FROM content WHERE hash NOT IN
             (SELECT DISTINCT hash FROM documents WHERE active = 1)",
            [],
        )?;
        Ok(rows)
    }
}

fn row_to_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        id: row.get(0)?,
        path: row.get(1)?,
        title: row.get(2)?,
        hash: row.get(3)?,
        page_count: row.get::<_, i64>(4)? as usize,
        source_type: row.get(5)?,
        created_at: row.get(6)?,
        modified_at: row.get(7)?,
        active: row.get::<_, i64>(8)? != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_content_stable() {
        let a = hash_content("legal text");
        let b = hash_content("legal text");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_insert_and_find_document() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        let hash = hash_content("contract body");
        db.insert_content(&hash, "contract body").unwrap();
        let id = db
            .insert_document("contracts/nda.pdf", "NDA", &hash, 3, "pdf")
            .unwrap();

        let doc = db.find_document_by_path("contracts/nda.pdf").unwrap().unwrap();
        assert_eq!(doc.id, id);
        assert_eq!(doc.title, "NDA");
        assert_eq!(doc.page_count, 3);
        assert!(doc.active);
    }

    #[test]
    fn test_deactivated_document_excluded_from_listing() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        let hash = hash_content("body");
        db.insert_content(&hash, "body").unwrap();
        let id = db
            .insert_document("old/ruling.pdf", "Ruling", &hash, 1, "pdf")
            .unwrap();
        assert_eq!(db.list_documents().unwrap().len(), 1);

        db.deactivate_document(id).unwrap();
        assert!(db.list_documents().unwrap().is_empty());
    }
}
