//! LexRAG CLI
//!
//! Retrieval-augmented question answering over your legal documents.

use anyhow::Result;
use clap::Parser;
use lexrag_core::Database;

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    // Open database (use LEXRAG_DB env var if set, otherwise use default)
    let db_path = std::env::var("LEXRAG_DB")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| Database::default_path());
    let db = Database::open(&db_path)?;
    db.initialize()?;

    match cli.command {
        Commands::Ingest(args) => commands::ingest::run(args, &db, cli.verbose).await,
        Commands::Search(args) => commands::search::run(args, &db, cli.format).await,
        Commands::Ask(args) => commands::ask::run(args, &db, cli.format).await,
        Commands::Status => commands::status::run(&db, cli.format).await,
        Commands::Cleanup => commands::cleanup::run(&db).await,
    }
}
