//! RAG answer engine
//!
//! Embeds the question, retrieves the top-k chunks, and asks the LLM to
//! answer strictly from the assembled context. When retrieval comes back
//! empty the fixed no-information answer is returned without an LLM call.

use crate::config::{Config, RetrievalConfig};
use crate::db::Database;
use crate::error::Result;
use crate::llm::{ChatMessage, Embedder, HttpEmbedder, LlmClient, OpenAiClient};
use crate::search::{assemble_context, Citation, RetrievalOptions, Retriever, ScoredChunk};
use std::sync::Arc;

/// Answer returned when nothing relevant is indexed
pub const NO_CONTEXT_ANSWER: &str =
    "I don't have enough information in the indexed documents to answer that.";

/// A generated answer with the citations that backed it
#[derive(Debug, Clone, serde::Serialize)]
pub struct Answer {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// RAG engine: retrieval plus constrained answer synthesis
pub struct RagEngine {
    client: Arc<dyn LlmClient>,
    embedder: Arc<dyn Embedder>,
    retrieval: RetrievalConfig,
}

impl RagEngine {
    /// Create from explicit collaborators
    pub fn new(
        client: Arc<dyn LlmClient>,
        embedder: Arc<dyn Embedder>,
        retrieval: RetrievalConfig,
    ) -> Self {
        Self {
            client,
            embedder,
            retrieval,
        }
    }

    /// Create from configuration, sharing one HTTP client for chat and
    /// embeddings
    pub fn from_config(config: &Config) -> Result<Self> {
        let client: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(config.llm_service.clone())?);
        let embedder: Arc<dyn Embedder> = Arc::new(HttpEmbedder::new(client.clone()));
        Ok(Self::new(client, embedder, config.retrieval.clone()))
    }

    /// Embed a query and retrieve ranked hits with their citations
    pub async fn search(
        &self,
        db: &Database,
        query: &str,
        options: &RetrievalOptions,
    ) -> Result<(Vec<ScoredChunk>, Vec<Citation>)> {
        let query_embedding = self.embedder.embed(query).await?;
        let retriever = Retriever::from_store(db)?;
        let hits = retriever.retrieve(&query_embedding, options)?;
        let assembled = assemble_context(db, &hits)?;
        Ok((hits, assembled.citations))
    }

    /// Answer a question from the indexed corpus
    pub async fn answer(&self, db: &Database, question: &str) -> Result<Answer> {
        let options = RetrievalOptions {
            k: self.retrieval.k,
            per_doc_cap: self.retrieval.per_doc_cap,
        };

        let query_embedding = self.embedder.embed(question).await?;
        let retriever = Retriever::from_store(db)?;
        let hits = retriever.retrieve(&query_embedding, &options)?;

        if hits.is_empty() {
            tracing::debug!("Retrieval returned nothing for: {}", question);
            return Ok(Answer {
                text: NO_CONTEXT_ANSWER.to_string(),
                citations: Vec::new(),
            });
        }

        let assembled = assemble_context(db, &hits)?;
        let messages = build_messages(question, &assembled.text);

        tracing::debug!(
            "Answering with {} chunks of context ({} chars)",
            hits.len(),
            assembled.text.len()
        );

        let text = self.client.chat_completion(messages).await?;

        Ok(Answer {
            text,
            citations: assembled.citations,
        })
    }
}

/// Build the constrained prompt: the model may use ONLY the retrieved context
fn build_messages(question: &str, context: &str) -> Vec<ChatMessage> {
    let system = "You are an expert legal assistant. Answer using ONLY the numbered \
                  context passages provided. Cite passages by their number, like [1]. \
                  If the context does not contain the answer, say \
                  \"I can't find that information in the provided documents.\"";

    let user = format!("CONTEXT:\n{}\n\nQUESTION:\n{}", context, question);

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}
