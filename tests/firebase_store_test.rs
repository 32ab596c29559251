//! Integration tests for the Firebase Realtime Database store against a mock
//! server.

use blograg::adapters::FirebaseVectorStore;
use blograg::infrastructure::RetryPolicy;
use blograg::{EmbeddingRecord, RagError, VectorStore};
use mockito::{Matcher, Server};
use serde_json::json;

mod common;

fn store(url: &str) -> FirebaseVectorStore {
    FirebaseVectorStore::new(&common::store_config(url), RetryPolicy::none())
        .expect("Failed to create store")
}

#[tokio::test]
async fn test_exists_uses_shallow_read() {
    let mut server = Server::new_async().await;
    let present = server
        .mock("GET", "/blog_embeddings/known.json")
        .match_query(Matcher::UrlEncoded("shallow".into(), "true".into()))
        .with_status(200)
        .with_body("true")
        .create_async()
        .await;
    let absent = server
        .mock("GET", "/blog_embeddings/unknown.json")
        .match_query(Matcher::UrlEncoded("shallow".into(), "true".into()))
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let store = store(&server.url());
    assert!(store.exists("known").await.unwrap());
    assert!(!store.exists("unknown").await.unwrap());
    present.assert_async().await;
    absent.assert_async().await;
}

#[tokio::test]
async fn test_put_writes_record_json() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/blog_embeddings/post.json")
        .match_body(Matcher::Json(json!({
            "id": "post",
            "vector": [0.5, -0.25],
            "content": "Hello"
        })))
        .with_status(200)
        .with_body(r#"{"id":"post","vector":[0.5,-0.25],"content":"Hello"}"#)
        .create_async()
        .await;

    let record = EmbeddingRecord::new("post", vec![0.5, -0.25]).with_content("Hello");
    store(&server.url()).put(&record).await.expect("put failed");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_put_rejects_invalid_record_without_io() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = store(&server.url())
        .put(&EmbeddingRecord::new("post", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, RagError::InvalidRecord(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_round_trip_and_not_found() {
    let mut server = Server::new_async().await;
    let _found = server
        .mock("GET", "/blog_embeddings/post.json")
        .with_status(200)
        .with_body(r#"{"id":"post","vector":[1.0,2.0],"content":"text"}"#)
        .create_async()
        .await;
    let _missing = server
        .mock("GET", "/blog_embeddings/ghost.json")
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let store = store(&server.url());
    let record = store.get("post").await.unwrap();
    assert_eq!(
        record,
        EmbeddingRecord::new("post", vec![1.0, 2.0]).with_content("text")
    );
    assert!(matches!(store.get("ghost").await, Err(RagError::NotFound(id)) if id == "ghost"));
}

#[tokio::test]
async fn test_get_all_skips_malformed_entries() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/blog_embeddings.json")
        .with_status(200)
        .with_body(
            json!({
                "b-post": { "id": "b-post", "vector": [0.0, 1.0] },
                "a-post": { "vector": [1.0, 0.0], "content": "legacy record without id" },
                "broken": { "content": "no vector" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let snapshot = store(&server.url()).get_all().await.unwrap();
    let ids: Vec<&str> = snapshot.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["a-post", "b-post"]);
    assert_eq!(snapshot["a-post"].id, "a-post");
}

#[tokio::test]
async fn test_get_all_on_empty_namespace() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/blog_embeddings.json")
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    assert!(store(&server.url()).get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_auth_token_is_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/blog_embeddings/post.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("auth".into(), "secret-token".into()),
            Matcher::UrlEncoded("shallow".into(), "true".into()),
        ]))
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let mut config = common::store_config(&server.url());
    config.auth_token = Some("secret-token".to_string());
    let store = FirebaseVectorStore::new(&config, RetryPolicy::none()).unwrap();

    assert!(!store.exists("post").await.unwrap());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_permission_denied_is_a_store_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/blog_embeddings.json")
        .with_status(401)
        .with_body(r#"{"error":"Permission denied"}"#)
        .create_async()
        .await;

    let err = store(&server.url()).get_all().await.unwrap_err();
    assert!(matches!(err, RagError::Store(_)));
    assert!(err.to_string().contains("Permission denied"));
}

#[test]
fn test_missing_database_url() {
    temp_env::with_var_unset("FIREBASE_URL", || {
        let config = blograg::domain::models::StoreConfig::default();
        let err = FirebaseVectorStore::new(&config, RetryPolicy::none())
            .err()
            .expect("store without a URL must not build");
        assert!(err.to_string().contains("FIREBASE_URL"));
    });
}

#[test]
fn test_database_url_from_environment() {
    temp_env::with_var("FIREBASE_URL", Some("https://env.firebaseio.com"), || {
        let config = blograg::domain::models::StoreConfig::default();
        assert!(FirebaseVectorStore::new(&config, RetryPolicy::none()).is_ok());
    });
}
