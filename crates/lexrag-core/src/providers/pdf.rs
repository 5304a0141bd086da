//! PDF loader built on pdf-extract

use crate::error::{LexRagError, Result};
use crate::providers::{document_from_pages, DocumentLoader, LoadedDocument};
use async_trait::async_trait;
use std::fs;
use std::path::Path;

/// Loader for extracting text from PDF files
pub struct PdfLoader;

impl Default for PdfLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfLoader {
    /// Create a new PdfLoader
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = fs::read(path).map_err(|e| {
            LexRagError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read PDF file {:?}: {}", path, e),
            ))
        })?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            LexRagError::Parse(format!("Failed to extract text from PDF {:?}: {}", path, e))
        })?;

        if text.trim().is_empty() {
            return Err(LexRagError::Parse(format!(
                "PDF file {:?} contains no extractable text (may be image-based)",
                path
            )));
        }

        Ok(split_pages(&text))
    }
}

/// Split extracted text into pages on form feeds; single page if none
fn split_pages(text: &str) -> Vec<String> {
    let pages: Vec<String> = text
        .split('\u{c}')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    if pages.is_empty() {
        vec![text.trim().to_string()]
    } else {
        pages
    }
}

#[async_trait]
impl DocumentLoader for PdfLoader {
    fn loader_type(&self) -> &'static str {
        "pdf"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["pdf"]
    }

    async fn load(&self, path: &Path) -> Result<LoadedDocument> {
        let pages = self.extract_pages(path)?;
        Ok(document_from_pages(path, pages, "pdf"))
    }
}
