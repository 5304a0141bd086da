//! Plain-text loader for .txt and .md files

use crate::error::{LexRagError, Result};
use crate::providers::{document_from_pages, DocumentLoader, LoadedDocument};
use async_trait::async_trait;
use std::fs;
use std::path::Path;

/// Loader for plain text files, treated as a single page
pub struct TextLoader;

impl Default for TextLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLoader {
    /// Create a new TextLoader
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentLoader for TextLoader {
    fn loader_type(&self) -> &'static str {
        "text"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["txt", "md"]
    }

    async fn load(&self, path: &Path) -> Result<LoadedDocument> {
        let content = fs::read_to_string(path).map_err(|e| {
            LexRagError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read text file {:?}: {}", path, e),
            ))
        })?;

        if content.trim().is_empty() {
            return Err(LexRagError::Parse(format!(
                "Text file {:?} is empty",
                path
            )));
        }

        Ok(document_from_pages(path, vec![content], "text"))
    }
}
