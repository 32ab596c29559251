//! Integration tests for the Gemini embedding adapter against a mock server.

use blograg::adapters::GeminiEmbeddingProvider;
use blograg::domain::models::EmbeddingTaskType;
use blograg::infrastructure::RetryPolicy;
use blograg::{EmbeddingProvider, RagError};
use mockito::{Matcher, Server};
use serde_json::json;

mod common;

const EMBED_PATH: &str = "/models/text-embedding-004:embedContent";

fn embedding_body(values: &[f32]) -> String {
    json!({ "embedding": { "values": values } }).to_string()
}

#[tokio::test]
async fn test_embed_success_with_mock() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", EMBED_PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "model": "models/text-embedding-004",
            "content": { "parts": [{ "text": "Hello world" }] },
            "taskType": "RETRIEVAL_DOCUMENT",
            "title": "Embedding of paragraph"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(embedding_body(&[0.1, 0.2, 0.3]))
        .create_async()
        .await;

    let provider = GeminiEmbeddingProvider::new(
        common::embedding_config(&server.url()),
        RetryPolicy::none(),
    )
    .expect("Failed to create provider");

    let vector = provider.embed("Hello world").await.expect("embed failed");
    assert_eq!(vector, vec![0.1, 0.2, 0.3]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_query_task_type_omits_title() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", EMBED_PATH)
        .match_body(Matcher::Json(json!({
            "model": "models/text-embedding-004",
            "content": { "parts": [{ "text": "q" }] },
            "taskType": "RETRIEVAL_QUERY"
        })))
        .with_status(200)
        .with_body(embedding_body(&[1.0, 0.0, 0.0]))
        .create_async()
        .await;

    let mut config = common::embedding_config(&server.url());
    config.task_type = EmbeddingTaskType::RetrievalQuery;
    let provider = GeminiEmbeddingProvider::new(config, RetryPolicy::none()).unwrap();

    provider.embed("q").await.expect("embed failed");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", EMBED_PATH)
        .with_status(503)
        .with_body("unavailable")
        .expect(3)
        .create_async()
        .await;

    let provider = GeminiEmbeddingProvider::new(
        common::embedding_config(&server.url()),
        RetryPolicy::new(2, 1, 5),
    )
    .unwrap();

    let err = provider.embed("text").await.unwrap_err();
    assert!(matches!(err, RagError::EmbeddingService(_)));
    assert!(err.to_string().contains("503"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", EMBED_PATH)
        .with_status(400)
        .with_body(
            json!({"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}})
                .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let provider = GeminiEmbeddingProvider::new(
        common::embedding_config(&server.url()),
        RetryPolicy::new(2, 1, 5),
    )
    .unwrap();

    let err = provider.embed("text").await.unwrap_err();
    assert!(err.to_string().contains("API key not valid."));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_response_is_an_embedding_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", EMBED_PATH)
        .with_status(200)
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;

    let provider = GeminiEmbeddingProvider::new(
        common::embedding_config(&server.url()),
        RetryPolicy::none(),
    )
    .unwrap();

    let err = provider.embed("text").await.unwrap_err();
    assert!(matches!(err, RagError::EmbeddingService(_)));
}
