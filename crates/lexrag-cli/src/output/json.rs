//! JSON output formatter

use super::SearchHit;
use lexrag_core::{Answer, StoreStats};

pub fn format_hits(hits: &[SearchHit]) -> String {
    serde_json::to_string_pretty(hits).unwrap_or_else(|_| "[]".to_string())
}

pub fn format_answer(answer: &Answer) -> String {
    serde_json::to_string_pretty(answer).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_stats(stats: &StoreStats) -> String {
    serde_json::to_string_pretty(stats).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_serialize_without_text_field() {
        let hits = vec![SearchHit {
            rank: 1,
            score: 0.5,
            title: "T".to_string(),
            path: "p".to_string(),
            pages: "p. 1".to_string(),
            chunk_id: 1,
            text: None,
        }];
        let json = format_hits(&hits);
        assert!(json.contains("\"rank\": 1"));
        assert!(!json.contains("\"text\""));
    }
}
