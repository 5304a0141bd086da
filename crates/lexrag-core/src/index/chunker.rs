//! Sliding-window chunking with page tracking
//!
//! Splits document text into overlapping character windows, preferring
//! paragraph and sentence boundaries. Each chunk carries the 1-based page
//! range it was cut from so answers can cite sources.

use crate::config::ChunkingConfig;
use crate::db::hash_content;
use crate::error::Result;

/// Separator inserted between pages when joining a document
const PAGE_SEPARATOR: &str = "\n\n";

/// Document chunk with provenance
#[derive(Debug, Clone)]
pub struct Chunk {
    pub text: String,
    /// Byte offset into the joined document text
    pub position: usize,
    /// First page this chunk draws from (1-based)
    pub page_start: usize,
    /// Last page this chunk draws from (1-based)
    pub page_end: usize,
    /// SHA-256 of the chunk text
    pub chunk_hash: String,
}

/// Chunk a document given as pages.
///
/// The window settings are validated first: a zero chunk size or an overlap
/// that swallows the whole window would keep the cursor from advancing.
pub fn chunk_document(pages: &[String], config: &ChunkingConfig) -> Result<Vec<Chunk>> {
    config.validate()?;

    if pages.is_empty() {
        return Ok(Vec::new());
    }

    let joined = pages.join(PAGE_SEPARATOR);
    if joined.trim().is_empty() {
        return Ok(Vec::new());
    }

    // Byte offset at which each page starts in the joined text
    let mut page_offsets = Vec::with_capacity(pages.len());
    let mut offset = 0;
    for page in pages {
        page_offsets.push(offset);
        offset += page.len() + PAGE_SEPARATOR.len();
    }

    Ok(windows(&joined, config.chunk_size, config.chunk_overlap)
        .into_iter()
        .map(|(text, position)| {
            let end = position + text.len().saturating_sub(1);
            Chunk {
                chunk_hash: hash_content(&text),
                page_start: page_for_offset(&page_offsets, position),
                page_end: page_for_offset(&page_offsets, end),
                text,
                position,
            }
        })
        .collect())
}

/// Map a byte offset to its 1-based page number
fn page_for_offset(page_offsets: &[usize], offset: usize) -> usize {
    match page_offsets.binary_search(&offset) {
        Ok(idx) => idx + 1,
        Err(idx) => idx.max(1),
    }
}

/// Find a valid char boundary at or before the given byte index
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Find a valid char boundary at or after the given byte index
fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Cut overlapping character windows, returning (text, position) pairs
fn windows(content: &str, chunk_size: usize, overlap: usize) -> Vec<(String, usize)> {
    if content.len() <= chunk_size {
        return vec![(content.to_string(), 0)];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < content.len() {
        let raw_end = (start + chunk_size).min(content.len());
        let end = floor_char_boundary(content, raw_end);
        let mut chunk_end = end;

        // Find natural break point in last 30%
        if end < content.len() {
            let search_start_raw = start + (chunk_size * 70 / 100);
            let search_start = ceil_char_boundary(content, search_start_raw);

            if search_start < end {
                let search_region = &content[search_start..end];

                if let Some(pos) = search_region.rfind("\n\n") {
                    chunk_end = search_start + pos + 2;
                } else if let Some(pos) = search_region.rfind(". ") {
                    chunk_end = search_start + pos + 2;
                } else if let Some(pos) = search_region.rfind('\n') {
                    chunk_end = search_start + pos + 1;
                } else if let Some(pos) = search_region.rfind(' ') {
                    chunk_end = search_start + pos + 1;
                }
            }
        }

        chunk_end = floor_char_boundary(content, chunk_end);

        chunks.push((content[start..chunk_end].to_string(), start));

        if chunk_end >= content.len() {
            break;
        }

        let new_start_raw = chunk_end.saturating_sub(overlap);
        start = ceil_char_boundary(content, new_start_raw);
    }

    chunks
}
