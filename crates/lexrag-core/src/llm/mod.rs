//! LLM integration: embeddings and chat completion over HTTP

mod client;
mod http_embedder;
mod traits;

pub use client::{ChatMessage, LlmClient, OpenAiClient};
pub use http_embedder::HttpEmbedder;
pub use traits::Embedder;
