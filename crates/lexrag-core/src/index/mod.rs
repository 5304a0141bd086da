//! Indexing: scanning, chunking, and the ingestion pipeline

pub mod chunker;
pub mod pipeline;
pub mod scanner;

pub use chunker::{chunk_document, Chunk};
pub use pipeline::{ingest_directory, ingest_file, IngestProgress, IngestStats, ProgressFn};
pub use scanner::{scan_files, ScanOptions, ScanResult};
