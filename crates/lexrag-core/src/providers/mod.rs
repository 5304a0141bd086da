//! Document loader abstraction
//!
//! Turns source files into plain text the rest of the pipeline can chunk and
//! embed. Loaders are narrow collaborators: they know nothing about chunking,
//! embeddings, or storage.

use crate::db::hash_content;
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub mod pdf;
pub mod text;

pub use pdf::PdfLoader;
pub use text::TextLoader;

/// Document loader trait - all source formats must implement this
#[async_trait::async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Loader type identifier (e.g., "pdf", "text")
    fn loader_type(&self) -> &'static str;

    /// File extensions this loader handles (lowercase, no dot)
    fn extensions(&self) -> &'static [&'static str];

    /// Load a file into pages of plain text
    async fn load(&self, path: &Path) -> Result<LoadedDocument>;
}

/// A loaded document, split into pages
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Source path as given
    pub path: String,

    /// Display title (first line of content or filename stem)
    pub title: String,

    /// Plain text, one entry per page. Always non-empty.
    pub pages: Vec<String>,

    /// Content hash (SHA-256 of all pages joined)
    pub hash: String,

    /// Loader type that produced this document
    pub source_type: String,
}

impl LoadedDocument {
    /// Full text with pages joined by blank lines
    pub fn full_text(&self) -> String {
        self.pages.join("\n\n")
    }
}

/// Extract a display title: first short non-empty line, else filename stem
pub(crate) fn extract_title(content: &str, path: &Path) -> String {
    let first_line = content
        .lines()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .unwrap_or("");

    if !first_line.is_empty() && first_line.len() < 200 {
        return first_line.to_string();
    }

    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.replace('_', " ").replace('-', " "))
        .unwrap_or_else(|| "Untitled".to_string())
}

/// Build a LoadedDocument from pages, hashing the joined text
pub(crate) fn document_from_pages(
    path: &Path,
    pages: Vec<String>,
    source_type: &str,
) -> LoadedDocument {
    let full = pages.join("\n\n");
    let title = extract_title(&full, path);
    let hash = hash_content(&full);

    LoadedDocument {
        path: path.to_string_lossy().to_string(),
        title,
        pages,
        hash,
        source_type: source_type.to_string(),
    }
}

/// Registry dispatching loaders by file extension
pub struct LoaderRegistry {
    loaders: HashMap<String, Arc<dyn DocumentLoader>>,
}

impl LoaderRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Create registry with default loaders
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfLoader::new()));
        registry.register(Arc::new(TextLoader::new()));
        registry
    }

    /// Register a loader for all its extensions
    pub fn register(&mut self, loader: Arc<dyn DocumentLoader>) {
        for ext in loader.extensions() {
            self.loaders.insert(ext.to_string(), loader.clone());
        }
    }

    /// Get loader for a path, by extension
    pub fn for_path(&self, path: &Path) -> Option<Arc<dyn DocumentLoader>> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        self.loaders.get(&ext).cloned()
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_extract_title_from_content() {
        let title = extract_title(
            "   \n\nEmployment Agreement\n\nSome content here...",
            Path::new("test.pdf"),
        );
        assert_eq!(title, "Employment Agreement");
    }

    #[test]
    fn test_extract_title_from_filename() {
        let title = extract_title("", Path::new("services_contract-v2.pdf"));
        assert_eq!(title, "services contract v2");
    }

    #[test]
    fn test_extract_title_long_first_line() {
        let long_line = "a".repeat(250);
        let content = format!("{}\n\nMore content", long_line);
        let title = extract_title(&content, Path::new("ruling.pdf"));
        assert_eq!(title, "ruling");
    }

    #[test]
    fn test_registry_dispatch_by_extension() {
        let registry = LoaderRegistry::with_defaults();
        assert_eq!(
            registry
                .for_path(&PathBuf::from("a.PDF"))
                .unwrap()
                .loader_type(),
            "pdf"
        );
        assert_eq!(
            registry
                .for_path(&PathBuf::from("notes.md"))
                .unwrap()
                .loader_type(),
            "text"
        );
        assert!(registry.for_path(&PathBuf::from("image.png")).is_none());
    }
}
