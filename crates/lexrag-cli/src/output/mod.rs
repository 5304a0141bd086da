//! Output formatters

pub mod json;
pub mod terminal;

use crate::app::OutputFormat;
use lexrag_core::{Answer, StoreStats};

/// One search hit prepared for display
#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchHit {
    pub rank: usize,
    pub score: f32,
    pub title: String,
    pub path: String,
    pub pages: String,
    pub chunk_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Format search hits
pub fn format_hits(hits: &[SearchHit], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_hits(hits),
        OutputFormat::Cli => terminal::format_hits(hits),
    }
}

/// Format a generated answer
pub fn format_answer(answer: &Answer, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_answer(answer),
        OutputFormat::Cli => terminal::format_answer(answer),
    }
}

/// Format store stats
pub fn format_stats(stats: &StoreStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_stats(stats),
        OutputFormat::Cli => terminal::format_stats(stats),
    }
}
