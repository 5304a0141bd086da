//! Retrieval module
//!
//! Top-k cosine similarity over stored chunk embeddings, with deterministic
//! tie-breaking and per-document capping, plus context assembly for answer
//! synthesis.

mod context;
mod retriever;

pub use context::{assemble_context, AssembledContext, Citation};
pub use retriever::{cosine_similarity, IndexedChunk, RetrievalOptions, Retriever, ScoredChunk};
