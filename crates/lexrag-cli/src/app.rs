//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lexrag")]
#[command(
    author,
    version,
    about = "Retrieval-augmented question answering over your legal documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest documents into the store
    Ingest(IngestArgs),

    /// Similarity search over indexed chunks
    Search(SearchArgs),

    /// Ask a question, answered from the indexed documents
    Ask(AskArgs),

    /// Show store status
    Status,

    /// Remove orphaned rows and compact the store
    Cleanup,
}

#[derive(Args)]
pub struct IngestArgs {
    /// File or directory to ingest
    pub path: PathBuf,

    /// Glob pattern for directory scans
    #[arg(long, default_value = "**/*.pdf")]
    pub pattern: String,

    /// Re-ingest documents even if unchanged
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Number of results
    #[arg(short = 'n', long, default_value = "5")]
    pub limit: usize,

    /// Maximum results from a single document
    #[arg(long)]
    pub per_doc_cap: Option<usize>,

    /// Show chunk text with each result
    #[arg(long)]
    pub full: bool,
}

#[derive(Args)]
pub struct AskArgs {
    /// Question to answer
    #[arg(required = true)]
    pub question: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Cli,
    /// JSON output
    Json,
}
