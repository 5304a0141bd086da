//! Search command

use crate::app::{OutputFormat, SearchArgs};
use crate::output::{format_hits, SearchHit};
use anyhow::Result;
use lexrag_core::{Config, Database, LexRagError, RagEngine, RetrievalOptions};

pub async fn run(args: SearchArgs, db: &Database, format: OutputFormat) -> Result<()> {
    if args.limit == 0 {
        return Err(LexRagError::InvalidArgument(
            "result count must be a positive integer".to_string(),
        )
        .into());
    }

    if !db.has_embeddings() {
        eprintln!("No documents indexed yet. Run 'lexrag ingest <path>' first.");
        return Ok(());
    }

    let query = args.query.join(" ");
    let config = Config::load()?;
    let engine = RagEngine::from_config(&config)?;

    let options = RetrievalOptions {
        k: args.limit,
        per_doc_cap: args.per_doc_cap,
    };

    let (hits, citations) = engine.search(db, &query, &options).await?;

    let mut display = Vec::with_capacity(hits.len());
    for (rank, (hit, citation)) in hits.iter().zip(citations.iter()).enumerate() {
        let text = if args.full {
            Some(db.get_chunk_details(hit.chunk_id)?.text)
        } else {
            None
        };
        display.push(SearchHit {
            rank: rank + 1,
            score: hit.score,
            title: citation.doc_title.clone(),
            path: citation.doc_path.clone(),
            pages: citation.page_range(),
            chunk_id: hit.chunk_id,
            text,
        });
    }

    print!("{}", format_hits(&display, format));
    Ok(())
}
