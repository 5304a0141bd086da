//! Context assembly for answer synthesis
//!
//! Turns ranked retrieval hits into a numbered context block the LLM is
//! constrained to, plus the citations that back it.

use super::retriever::ScoredChunk;
use crate::db::Database;
use crate::error::Result;

/// Citation for one retrieved chunk
#[derive(Debug, Clone, serde::Serialize)]
pub struct Citation {
    pub chunk_id: i64,
    pub doc_title: String,
    pub doc_path: String,
    pub page_start: usize,
    pub page_end: usize,
    pub score: f32,
}

impl Citation {
    /// Human-readable page range, e.g. "p. 3" or "pp. 3-5"
    pub fn page_range(&self) -> String {
        if self.page_start == self.page_end {
            format!("p. {}", self.page_start)
        } else {
            format!("pp. {}-{}", self.page_start, self.page_end)
        }
    }
}

/// Assembled context block with its citations
#[derive(Debug, Clone)]
pub struct AssembledContext {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// Build the context block for a set of ranked hits.
///
/// Hits are rendered in rank order as numbered source blocks. The retriever
/// already guarantees ordering and deduplication; none of that is re-applied
/// here.
pub fn assemble_context(db: &Database, hits: &[ScoredChunk]) -> Result<AssembledContext> {
    let mut blocks = Vec::with_capacity(hits.len());
    let mut citations = Vec::with_capacity(hits.len());

    for (rank, hit) in hits.iter().enumerate() {
        let details = db.get_chunk_details(hit.chunk_id)?;

        let citation = Citation {
            chunk_id: hit.chunk_id,
            doc_title: details.doc_title,
            doc_path: details.doc_path,
            page_start: details.page_start,
            page_end: details.page_end,
            score: hit.score,
        };

        blocks.push(format!(
            "[{}] {} ({})\n{}",
            rank + 1,
            citation.doc_title,
            citation.page_range(),
            details.text.trim()
        ));
        citations.push(citation);
    }

    Ok(AssembledContext {
        text: blocks.join("\n\n"),
        citations,
    })
}
