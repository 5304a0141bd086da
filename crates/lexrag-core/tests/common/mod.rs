//! Shared test doubles: deterministic embedder and canned LLM client

use async_trait::async_trait;
use lexrag_core::{ChatMessage, Embedder, LexRagError, LlmClient, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// Deterministic embedder: canned vectors per text, hashed fallback
pub struct MockEmbedder {
    dimensions: usize,
    canned: HashMap<String, Vec<f32>>,
}

impl MockEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            canned: HashMap::new(),
        }
    }

    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        assert_eq!(vector.len(), self.dimensions);
        self.canned.insert(text.to_string(), vector);
        self
    }

    /// Fallback: spread character bytes across the vector, normalized enough
    /// for cosine comparison while staying fully deterministic
    fn derive(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for (i, byte) in text.bytes().enumerate() {
            vector[i % self.dimensions] += f32::from(byte) / 255.0;
        }
        vector
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self
            .canned
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.derive(text)))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        "mock-embedder"
    }
}

/// Canned LLM client: records prompts, returns a fixed completion
pub struct MockLlmClient {
    pub completion: String,
    pub embedder: MockEmbedder,
    pub requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLlmClient {
    pub fn new(completion: &str, dimensions: usize) -> Self {
        Self {
            completion: completion.to_string(),
            embedder: MockEmbedder::new(dimensions),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        self.requests.lock().unwrap().push(messages);
        Ok(self.completion.clone())
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embedder.embed(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.embedder.embed_batch(texts).await
    }

    fn embedding_dimensions(&self) -> usize {
        self.embedder.dimensions()
    }

    fn embedding_model_name(&self) -> &str {
        "mock-embedder"
    }

    fn model_name(&self) -> &str {
        "mock-llm"
    }
}

/// Embedder that always fails, for exercising error paths
pub struct FailingEmbedder {
    dimensions: usize,
}

impl FailingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(LexRagError::Provider("embedding service down".to_string()))
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(LexRagError::Provider("embedding service down".to_string()))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        "failing-embedder"
    }
}
