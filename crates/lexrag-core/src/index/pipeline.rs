//! Ingestion pipeline: scan, load, chunk, embed, store

use super::chunker::{chunk_document, Chunk};
use super::scanner::{scan_files, ScanOptions};
use crate::config::ChunkingConfig;
use crate::db::Database;
use crate::error::{LexRagError, Result};
use crate::llm::Embedder;
use crate::providers::{LoadedDocument, LoaderRegistry};
use std::path::Path;

const BATCH_SIZE: usize = 32;

/// Ingestion progress
#[derive(Debug, Clone)]
pub struct IngestProgress {
    pub total_files: usize,
    pub processed_files: usize,
    pub current_path: String,
}

/// Ingestion statistics
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct IngestStats {
    pub total_files: usize,
    pub ingested_documents: usize,
    pub skipped_documents: usize,
    pub failed_documents: usize,
    pub pruned_documents: usize,
    pub total_chunks: usize,
    pub embedded_chunks: usize,
}

/// Progress callback type
pub type ProgressFn = Box<dyn Fn(IngestProgress) + Send + Sync>;

/// Ingest all matching files under a directory
pub async fn ingest_directory(
    db: &Database,
    registry: &LoaderRegistry,
    embedder: &dyn Embedder,
    chunking: &ChunkingConfig,
    root: &Path,
    options: &ScanOptions,
    force: bool,
    progress: Option<ProgressFn>,
) -> Result<IngestStats> {
    chunking.validate()?;

    // Dimension check happens once, before any writes
    db.register_model(embedder.model_name(), embedder.dimensions())?;

    let files = scan_files(root, options)?;
    let total_files = files.len();
    let mut stats = IngestStats {
        total_files,
        ..Default::default()
    };

    for (idx, file) in files.iter().enumerate() {
        if let Some(ref cb) = progress {
            cb(IngestProgress {
                total_files,
                processed_files: idx,
                current_path: file.relative_path.clone(),
            });
        }

        // Files the scan matched but no loader handles are skipped, not errors
        if registry.for_path(&file.path).is_none() {
            tracing::debug!("No loader for {:?}, skipping", file.path);
            stats.skipped_documents += 1;
            continue;
        }

        match ingest_one(db, registry, embedder, chunking, &file.path, force).await {
            Ok(Some(chunk_count)) => {
                stats.ingested_documents += 1;
                stats.total_chunks += chunk_count;
                stats.embedded_chunks += chunk_count;
            }
            Ok(None) => stats.skipped_documents += 1,
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", file.path, e);
                stats.failed_documents += 1;
            }
        }
    }

    // Documents under this root whose source files are gone get deactivated;
    // `cleanup` reclaims their rows later
    for doc in db.list_documents()? {
        let doc_path = Path::new(&doc.path);
        if doc_path.starts_with(root) && !doc_path.exists() {
            tracing::info!("Pruning missing document: {}", doc.path);
            db.deactivate_document(doc.id)?;
            stats.pruned_documents += 1;
        }
    }

    Ok(stats)
}

/// Ingest a single file
pub async fn ingest_file(
    db: &Database,
    registry: &LoaderRegistry,
    embedder: &dyn Embedder,
    chunking: &ChunkingConfig,
    path: &Path,
    force: bool,
) -> Result<IngestStats> {
    chunking.validate()?;
    db.register_model(embedder.model_name(), embedder.dimensions())?;

    let mut stats = IngestStats {
        total_files: 1,
        ..Default::default()
    };

    match ingest_one(db, registry, embedder, chunking, path, force).await? {
        Some(chunk_count) => {
            stats.ingested_documents = 1;
            stats.total_chunks = chunk_count;
            stats.embedded_chunks = chunk_count;
        }
        None => stats.skipped_documents = 1,
    }

    Ok(stats)
}

/// Load, chunk, embed and store one file.
///
/// Returns Ok(None) when the stored document already has the same content
/// hash and force is not set.
async fn ingest_one(
    db: &Database,
    registry: &LoaderRegistry,
    embedder: &dyn Embedder,
    chunking: &ChunkingConfig,
    path: &Path,
    force: bool,
) -> Result<Option<usize>> {
    let loader = registry.for_path(path).ok_or_else(|| {
        LexRagError::Provider(format!("No loader for file type: {:?}", path))
    })?;

    let doc = loader.load(path).await?;

    let existing = db.find_document_by_path(&doc.path)?;
    if let Some(ref existing_doc) = existing {
        if existing_doc.hash == doc.hash && existing_doc.active && !force {
            tracing::debug!("Unchanged, skipping: {}", doc.path);
            return Ok(None);
        }
    }

    let chunks = chunk_document(&doc.pages, chunking)?;
    if chunks.is_empty() {
        return Err(LexRagError::Parse(format!(
            "No text chunks produced for {:?}",
            path
        )));
    }

    // Embed before touching the store so a provider failure leaves it intact
    let mut embeddings = Vec::with_capacity(chunks.len());
    for batch in chunks.chunks(BATCH_SIZE) {
        let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
        let batch_embeddings = embedder.embed_batch(&texts).await?;
        for embedding in &batch_embeddings {
            if embedding.len() != embedder.dimensions() {
                return Err(LexRagError::DimensionMismatch {
                    expected: embedder.dimensions(),
                    actual: embedding.len(),
                });
            }
        }
        embeddings.extend(batch_embeddings);
    }

    persist_document(
        db,
        &doc,
        existing.as_ref().map(|d| d.id),
        &chunks,
        &embeddings,
        embedder.model_name(),
    )?;

    tracing::info!(
        "Ingested {} ({} pages, {} chunks)",
        doc.path,
        doc.pages.len(),
        chunks.len()
    );

    Ok(Some(chunks.len()))
}

/// Store one document's content, metadata, chunks and embeddings as a single
/// transaction. A failure mid-write leaves the previous state intact.
fn persist_document(
    db: &Database,
    doc: &LoadedDocument,
    existing_id: Option<i64>,
    chunks: &[Chunk],
    embeddings: &[Vec<f32>],
    model: &str,
) -> Result<i64> {
    db.begin_immediate()?;
    let result: Result<i64> = (|| {
        db.insert_content(&doc.hash, &doc.full_text())?;

        let doc_id = match existing_id {
            Some(id) => {
                db.delete_chunks_for_document(id)?;
                db.update_document(id, &doc.title, &doc.hash, doc.pages.len())?;
                id
            }
            None => db.insert_document(
                &doc.path,
                &doc.title,
                &doc.hash,
                doc.pages.len(),
                &doc.source_type,
            )?,
        };

        for (seq, (chunk, embedding)) in chunks.iter().zip(embeddings.iter()).enumerate() {
            let chunk_id = db.insert_chunk(
                doc_id,
                seq as u32,
                &chunk.text,
                chunk.page_start,
                chunk.page_end,
                &chunk.chunk_hash,
            )?;
            db.insert_embedding(chunk_id, model, embedding)?;
        }

        Ok(doc_id)
    })();

    match result {
        Ok(doc_id) => {
            db.commit()?;
            Ok(doc_id)
        }
        Err(e) => {
            db.rollback();
            Err(e)
        }
    }
}
