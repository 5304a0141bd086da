//! Terminal output formatter

use super::SearchHit;
use lexrag_core::{Answer, StoreStats};

pub fn format_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No results.\n".to_string();
    }

    let mut output = String::new();

    for hit in hits {
        let score_pct = (hit.score * 100.0) as i32;
        output.push_str(&format!(
            "{:>3}% [{}] {} ({}) - {}\n",
            score_pct, hit.rank, hit.title, hit.pages, hit.path
        ));

        if let Some(ref text) = hit.text {
            for line in text.lines().take(5) {
                output.push_str(&format!("  {}\n", line));
            }
            if text.lines().count() > 5 {
                output.push_str("  ...\n");
            }
        }
    }

    output
}

pub fn format_answer(answer: &Answer) -> String {
    let mut output = String::new();
    output.push_str(&answer.text);
    output.push('\n');

    if !answer.citations.is_empty() {
        output.push_str("\nSources:\n");
        for (i, citation) in answer.citations.iter().enumerate() {
            output.push_str(&format!(
                "  [{}] {} ({}) - {}\n",
                i + 1,
                citation.doc_title,
                citation.page_range(),
                citation.doc_path
            ));
        }
    }

    output
}

pub fn format_stats(stats: &StoreStats) -> String {
    let mut output = String::new();
    output.push_str(&format!("Documents:  {}\n", stats.document_count));
    output.push_str(&format!("Chunks:     {}\n", stats.chunk_count));
    output.push_str(&format!("Embedded:   {}\n", stats.embedded_count));
    output.push_str(&format!("Pending:    {}\n", stats.pending_embedding));
    if let Some(ref model) = stats.embedding_model {
        let dims = stats
            .embedding_dimensions
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".to_string());
        output.push_str(&format!("Model:      {} ({} dims)\n", model, dims));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty_hits() {
        assert_eq!(format_hits(&[]), "No results.\n");
    }

    #[test]
    fn test_format_hit_line() {
        let hits = vec![SearchHit {
            rank: 1,
            score: 0.87,
            title: "NDA".to_string(),
            path: "contracts/nda.pdf".to_string(),
            pages: "p. 2".to_string(),
            chunk_id: 7,
            text: None,
        }];
        let output = format_hits(&hits);
        assert!(output.contains("87%"));
        assert!(output.contains("NDA"));
        assert!(output.contains("contracts/nda.pdf"));
        // Framing stays plain ASCII for narrow terminals
        assert!(output.is_ascii());
    }

    #[test]
    fn test_format_answer_citations_ascii_framing() {
        let answer = Answer {
            text: "The notice period is 30 days [1].".to_string(),
            citations: vec![lexrag_core::Citation {
                chunk_id: 7,
                doc_title: "NDA".to_string(),
                doc_path: "contracts/nda.pdf".to_string(),
                page_start: 2,
                page_end: 3,
                score: 0.9,
            }],
        };
        let output = format_answer(&answer);
        assert!(output.contains("Sources:"));
        assert!(output.contains("[1] NDA"));
        assert!(output.is_ascii());
    }
}
