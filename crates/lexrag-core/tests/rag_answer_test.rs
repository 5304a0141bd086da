//! RAG engine tests: retrieval-backed answers with citations

mod common;

use common::{MockEmbedder, MockLlmClient};
use lexrag_core::{Database, RagEngine, RetrievalConfig, NO_CONTEXT_ANSWER};
use std::sync::Arc;

const DIMS: usize = 4;

fn seeded_store() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.initialize().unwrap();

    let hash = lexrag_core::db::hash_content("labor code");
    db.insert_content(&hash, "labor code").unwrap();
    let doc_id = db
        .insert_document("labor_code.pdf", "Labor Code", &hash, 10, "pdf")
        .unwrap();

    let c0 = db
        .insert_chunk(
            doc_id,
            0,
            "Overtime is compensated at 150 percent of the base rate.",
            4,
            4,
            "h0",
        )
        .unwrap();
    let c1 = db
        .insert_chunk(
            doc_id,
            1,
            "Annual leave accrues at two days per month of service.",
            7,
            7,
            "h1",
        )
        .unwrap();

    db.register_model("mock-embedder", DIMS).unwrap();
    db.insert_embedding(c0, "mock-embedder", &[1.0, 0.0, 0.0, 0.0])
        .unwrap();
    db.insert_embedding(c1, "mock-embedder", &[0.0, 1.0, 0.0, 0.0])
        .unwrap();

    db
}

fn engine_with(client: Arc<MockLlmClient>, embedder: MockEmbedder, k: usize) -> RagEngine {
    RagEngine::new(
        client,
        Arc::new(embedder),
        RetrievalConfig {
            k,
            per_doc_cap: None,
        },
    )
}

#[tokio::test]
async fn test_answer_uses_best_matching_context() {
    let db = seeded_store();

    let client = Arc::new(MockLlmClient::new("Overtime pays 150% [1].", DIMS));
    let embedder = MockEmbedder::new(DIMS)
        .with_vector("How is overtime paid?", vec![0.9, 0.1, 0.0, 0.0]);
    let engine = engine_with(client.clone(), embedder, 1);

    let answer = engine.answer(&db, "How is overtime paid?").await.unwrap();

    assert_eq!(answer.text, "Overtime pays 150% [1].");
    assert_eq!(answer.citations.len(), 1);
    assert_eq!(answer.citations[0].doc_title, "Labor Code");
    assert_eq!(answer.citations[0].page_start, 4);

    // The prompt sent to the LLM carried the overtime chunk, not the leave one
    let requests = client.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let user_msg = &requests[0][1].content;
    assert!(user_msg.contains("Overtime is compensated"));
    assert!(!user_msg.contains("Annual leave"));
}

#[tokio::test]
async fn test_answer_cites_multiple_chunks_in_rank_order() {
    let db = seeded_store();

    let client = Arc::new(MockLlmClient::new("See [1] and [2].", DIMS));
    let embedder =
        MockEmbedder::new(DIMS).with_vector("leave and overtime", vec![0.4, 0.9, 0.0, 0.0]);
    let engine = engine_with(client, embedder, 2);

    let answer = engine.answer(&db, "leave and overtime").await.unwrap();

    assert_eq!(answer.citations.len(), 2);
    // Leave chunk scores higher against [0.4, 0.9, ...]
    assert_eq!(answer.citations[0].page_start, 7);
    assert_eq!(answer.citations[1].page_start, 4);
    assert!(answer.citations[0].score >= answer.citations[1].score);
}

#[tokio::test]
async fn test_empty_store_short_circuits_llm() {
    let db = Database::open_in_memory().unwrap();
    db.initialize().unwrap();

    let client = Arc::new(MockLlmClient::new("should never be returned", DIMS));
    let engine = engine_with(client.clone(), MockEmbedder::new(DIMS), 5);

    let answer = engine.answer(&db, "anything").await.unwrap();

    assert_eq!(answer.text, NO_CONTEXT_ANSWER);
    assert!(answer.citations.is_empty());
    assert!(client.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_returns_hits_with_citations() {
    let db = seeded_store();

    let client = Arc::new(MockLlmClient::new("unused", DIMS));
    let embedder =
        MockEmbedder::new(DIMS).with_vector("overtime", vec![1.0, 0.0, 0.0, 0.0]);
    let engine = engine_with(client, embedder, 2);

    let (hits, citations) = engine
        .search(&db, "overtime", &Default::default())
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits.len(), citations.len());
    assert!(hits[0].score >= hits[1].score);
    assert_eq!(citations[0].doc_title, "Labor Code");
}
