//! LexRAG Core Library
//!
//! Retrieval-augmented generation over legal document collections.
//!
//! # Features
//! - PDF and plain-text ingestion with page tracking
//! - Sliding-window chunking with overlap
//! - SQLite-backed vector store with model dimension validation
//! - Deterministic top-k cosine retrieval with per-document capping
//! - Context assembly with citations and constrained answer synthesis

pub mod config;
pub mod db;
pub mod error;
pub mod index;
pub mod llm;
pub mod providers;
pub mod rag;
pub mod search;

pub use config::{ChunkingConfig, Config, LlmServiceConfig, RetrievalConfig};
pub use db::{ChunkDetails, Database, Document, StoreStats};
pub use error::{Error, LexRagError, Result};
pub use index::{
    chunk_document, ingest_directory, ingest_file, Chunk, IngestProgress, IngestStats, ScanOptions,
};
pub use llm::{ChatMessage, Embedder, HttpEmbedder, LlmClient, OpenAiClient};
pub use providers::{DocumentLoader, LoadedDocument, LoaderRegistry, PdfLoader, TextLoader};
pub use rag::{Answer, RagEngine, NO_CONTEXT_ANSWER};
pub use search::{
    assemble_context, cosine_similarity, AssembledContext, Citation, IndexedChunk,
    RetrievalOptions, Retriever, ScoredChunk,
};

/// Default cache directory name
pub const CACHE_DIR_NAME: &str = "lexrag";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "lexrag";
