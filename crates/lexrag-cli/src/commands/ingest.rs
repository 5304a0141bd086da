//! Ingest command

use crate::app::IngestArgs;
use anyhow::Result;
use lexrag_core::{
    ingest_directory, ingest_file, Config, Database, HttpEmbedder, IngestProgress, LoaderRegistry,
    ScanOptions,
};

pub async fn run(args: IngestArgs, db: &Database, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let embedder = HttpEmbedder::from_config(config.llm_service.clone())?;
    let registry = LoaderRegistry::with_defaults();

    let stats = if args.path.is_file() {
        ingest_file(
            db,
            &registry,
            &embedder,
            &config.chunking,
            &args.path,
            args.force,
        )
        .await?
    } else {
        let options = ScanOptions {
            pattern: args.pattern.clone(),
            ..Default::default()
        };

        let progress: Option<lexrag_core::index::ProgressFn> = if verbose {
            Some(Box::new(|p: IngestProgress| {
                eprintln!(
                    "[{}/{}] {}",
                    p.processed_files + 1,
                    p.total_files,
                    p.current_path
                );
            }))
        } else {
            None
        };

        ingest_directory(
            db,
            &registry,
            &embedder,
            &config.chunking,
            &args.path,
            &options,
            args.force,
            progress,
        )
        .await?
    };

    println!(
        "Ingested {} document(s), {} chunk(s) embedded ({} skipped, {} failed, {} pruned)",
        stats.ingested_documents, stats.embedded_chunks, stats.skipped_documents,
        stats.failed_documents, stats.pruned_documents
    );

    Ok(())
}
