//! Top-k similarity retrieval
//!
//! Ranks stored chunk embeddings against a query vector by cosine
//! similarity. Ordering is deterministic: ties keep chunk insertion order.

use crate::db::Database;
use crate::error::{LexRagError, Result};

/// A corpus entry: one indexed chunk embedding, in insertion order
#[derive(Debug, Clone)]
pub struct IndexedChunk {
    pub chunk_id: i64,
    pub doc_id: i64,
    pub embedding: Vec<f32>,
}

/// One ranked retrieval hit
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoredChunk {
    pub chunk_id: i64,
    pub doc_id: i64,
    pub score: f32,
}

/// Retrieval options
#[derive(Debug, Clone)]
pub struct RetrievalOptions {
    /// Number of results to return
    pub k: usize,
    /// Maximum hits from a single source document (no cap if unset)
    pub per_doc_cap: Option<usize>,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            k: 5,
            per_doc_cap: None,
        }
    }
}

/// In-memory retriever over a fixed corpus of chunk embeddings
#[derive(Debug)]
pub struct Retriever {
    corpus: Vec<IndexedChunk>,
    dimensions: Option<usize>,
}

impl Retriever {
    /// Build a retriever from a corpus. Dimensions are taken from the first
    /// entry; entries with a different dimension are rejected.
    pub fn new(corpus: Vec<IndexedChunk>) -> Result<Self> {
        let dimensions = corpus.first().map(|c| c.embedding.len());
        if let Some(dims) = dimensions {
            if let Some(bad) = corpus.iter().find(|c| c.embedding.len() != dims) {
                return Err(LexRagError::DimensionMismatch {
                    expected: dims,
                    actual: bad.embedding.len(),
                });
            }
        }
        Ok(Self { corpus, dimensions })
    }

    /// Build a retriever with known dimensions (used when the corpus may be
    /// empty but the index dimension is registered)
    pub fn with_dimensions(corpus: Vec<IndexedChunk>, dimensions: usize) -> Result<Self> {
        let retriever = Self::new(corpus)?;
        if let Some(dims) = retriever.dimensions {
            if dims != dimensions {
                return Err(LexRagError::DimensionMismatch {
                    expected: dimensions,
                    actual: dims,
                });
            }
        }
        Ok(Self {
            corpus: retriever.corpus,
            dimensions: Some(dimensions),
        })
    }

    /// Load the corpus from the store, in chunk insertion order
    pub fn from_store(db: &Database) -> Result<Self> {
        let corpus: Vec<IndexedChunk> = db
            .get_all_embeddings()?
            .into_iter()
            .map(|e| IndexedChunk {
                chunk_id: e.chunk_id,
                doc_id: e.doc_id,
                embedding: e.embedding,
            })
            .collect();

        match db.get_corpus_dimensions()? {
            Some(dims) => Self::with_dimensions(corpus, dims),
            None => Self::new(corpus),
        }
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    /// Whether the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Index dimensions, if known
    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    /// Retrieve the top-k chunks for a query embedding.
    ///
    /// Results are sorted by similarity descending; equal scores keep chunk
    /// insertion order. With a per-document cap, excess chunks from the same
    /// document are skipped in rank order. Read-only.
    pub fn retrieve(&self, query: &[f32], options: &RetrievalOptions) -> Result<Vec<ScoredChunk>> {
        if options.k == 0 {
            return Err(LexRagError::InvalidArgument(
                "k must be a positive integer".to_string(),
            ));
        }
        if let Some(cap) = options.per_doc_cap {
            if cap == 0 {
                return Err(LexRagError::InvalidArgument(
                    "per-document cap must be a positive integer".to_string(),
                ));
            }
        }

        if let Some(dims) = self.dimensions {
            if query.len() != dims {
                return Err(LexRagError::DimensionMismatch {
                    expected: dims,
                    actual: query.len(),
                });
            }
        }

        if self.corpus.is_empty() {
            return Ok(Vec::new());
        }

        // Score in corpus order; the stable sort then preserves insertion
        // order among equal scores.
        let mut scored: Vec<ScoredChunk> = self
            .corpus
            .iter()
            .map(|chunk| ScoredChunk {
                chunk_id: chunk.chunk_id,
                doc_id: chunk.doc_id,
                score: cosine_similarity(query, &chunk.embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let results = match options.per_doc_cap {
            Some(cap) => {
                let mut per_doc: std::collections::HashMap<i64, usize> =
                    std::collections::HashMap::new();
                scored
                    .into_iter()
                    .filter(|hit| {
                        let count = per_doc.entry(hit.doc_id).or_insert(0);
                        *count += 1;
                        *count <= cap
                    })
                    .take(options.k)
                    .collect()
            }
            None => scored.into_iter().take(options.k).collect(),
        };

        Ok(results)
    }
}

/// Compute cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(chunk_id: i64, doc_id: i64, embedding: Vec<f32>) -> IndexedChunk {
        IndexedChunk {
            chunk_id,
            doc_id,
            embedding,
        }
    }

    fn opts(k: usize) -> RetrievalOptions {
        RetrievalOptions {
            k,
            per_doc_cap: None,
        }
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_top_k_ordering() {
        // Scores against [1, 0]: 0.9..., 0.7..., 0.5... shaped corpus
        let retriever = Retriever::new(vec![
            chunk(1, 1, vec![0.5, 0.866]), // cos = 0.5
            chunk(2, 1, vec![0.9, 0.436]), // cos = 0.9
            chunk(3, 2, vec![0.7, 0.714]), // cos = 0.7
        ])
        .unwrap();

        let results = retriever.retrieve(&[1.0, 0.0], &opts(2)).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk_id, 2);
        assert_eq!(results[1].chunk_id, 3);
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn test_k_larger_than_corpus_returns_all() {
        let retriever = Retriever::new(vec![
            chunk(1, 1, vec![1.0, 0.0]),
            chunk(2, 1, vec![0.0, 1.0]),
        ])
        .unwrap();

        let results = retriever.retrieve(&[1.0, 0.0], &opts(10)).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_empty_corpus_returns_empty() {
        let retriever = Retriever::new(Vec::new()).unwrap();
        let results = retriever.retrieve(&[1.0, 0.0], &opts(5)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_zero_k_is_invalid() {
        let retriever = Retriever::new(vec![chunk(1, 1, vec![1.0, 0.0])]).unwrap();
        let err = retriever.retrieve(&[1.0, 0.0], &opts(0)).unwrap_err();
        assert!(matches!(err, LexRagError::InvalidArgument(_)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let retriever = Retriever::new(vec![chunk(1, 1, vec![1.0, 0.0, 0.0])]).unwrap();
        let err = retriever.retrieve(&[1.0, 0.0], &opts(1)).unwrap_err();
        assert!(matches!(
            err,
            LexRagError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_dimension_mismatch_on_empty_corpus_with_known_dims() {
        let retriever = Retriever::with_dimensions(Vec::new(), 384).unwrap();
        let err = retriever.retrieve(&[1.0, 0.0], &opts(1)).unwrap_err();
        assert!(matches!(err, LexRagError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_mixed_corpus_dimensions_rejected() {
        let err = Retriever::new(vec![
            chunk(1, 1, vec![1.0, 0.0]),
            chunk(2, 1, vec![1.0, 0.0, 0.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, LexRagError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        // All identical vectors, identical scores
        let retriever = Retriever::new(vec![
            chunk(10, 1, vec![1.0, 0.0]),
            chunk(11, 2, vec![1.0, 0.0]),
            chunk(12, 3, vec![1.0, 0.0]),
        ])
        .unwrap();

        let results = retriever.retrieve(&[1.0, 0.0], &opts(3)).unwrap();
        let ids: Vec<i64> = results.iter().map(|r| r.chunk_id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn test_per_doc_cap() {
        // Doc 1 holds the two best chunks; cap of 1 lets doc 2 through
        let retriever = Retriever::new(vec![
            chunk(1, 1, vec![1.0, 0.0]),
            chunk(2, 1, vec![0.95, 0.312]),
            chunk(3, 2, vec![0.5, 0.866]),
        ])
        .unwrap();

        let options = RetrievalOptions {
            k: 2,
            per_doc_cap: Some(1),
        };
        let results = retriever.retrieve(&[1.0, 0.0], &options).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk_id, 1);
        assert_eq!(results[1].chunk_id, 3);
    }

    #[test]
    fn test_per_doc_cap_zero_is_invalid() {
        let retriever = Retriever::new(vec![chunk(1, 1, vec![1.0])]).unwrap();
        let options = RetrievalOptions {
            k: 1,
            per_doc_cap: Some(0),
        };
        let err = retriever.retrieve(&[1.0], &options).unwrap_err();
        assert!(matches!(err, LexRagError::InvalidArgument(_)));
    }

    #[test]
    fn test_no_duplicate_chunk_ids() {
        let retriever = Retriever::new(vec![
            chunk(1, 1, vec![1.0, 0.0]),
            chunk(2, 2, vec![0.8, 0.6]),
            chunk(3, 3, vec![0.6, 0.8]),
        ])
        .unwrap();

        let results = retriever.retrieve(&[1.0, 0.0], &opts(3)).unwrap();
        let mut ids: Vec<i64> = results.iter().map(|r| r.chunk_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), results.len());
    }
}
