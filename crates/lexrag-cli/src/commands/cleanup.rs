//! Cleanup command

use anyhow::Result;
use lexrag_core::Database;

pub async fn run(db: &Database) -> Result<()> {
    let chunks = db.cleanup_orphaned_chunks()?;
    let embeddings = db.cleanup_orphaned_embeddings()?;
    let content = db.cleanup_orphaned_content()?;
    db.vacuum()?;

    println!(
        "Removed {} chunk(s), {} embedding(s), {} content row(s)",
        chunks, embeddings, content
    );
    Ok(())
}
