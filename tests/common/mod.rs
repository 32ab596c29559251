//! Common test utilities for integration tests
//!
//! Shared fakes for the domain ports and config builders pointing the HTTP
//! adapters at a mock server.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blograg::domain::models::{Config, EmbeddingConfig, GenerationConfig, StoreConfig};
use blograg::{AnswerGenerator, EmbeddingProvider, EmbeddingVector, RagResult};
use tempfile::TempDir;

/// Words the keyword embedder counts, one dimension each.
pub const VOCABULARY: [&str; 4] = ["rust", "go", "python", "blog"];

/// Deterministic embedder: counts vocabulary words, plus a constant bias
/// dimension so no text embeds to the zero vector.
pub struct KeywordEmbedder {
    calls: Arc<Mutex<usize>>,
}

impl KeywordEmbedder {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn dimension(&self) -> usize {
        VOCABULARY.len() + 1
    }

    async fn embed(&self, text: &str) -> RagResult<EmbeddingVector> {
        *self.calls.lock().unwrap() += 1;
        let lower = text.to_lowercase();
        let mut vector: Vec<f32> = VOCABULARY
            .iter()
            .map(|word| {
                lower
                    .split(|c: char| !c.is_alphanumeric())
                    .filter(|token| token == word)
                    .count() as f32
            })
            .collect();
        vector.push(0.1);
        Ok(vector)
    }
}

/// Returns a canned answer and records prompts.
pub struct CannedGenerator {
    pub answer: String,
    pub prompts: Mutex<Vec<String>>,
}

impl CannedGenerator {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AnswerGenerator for CannedGenerator {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn generate(&self, prompt: &str) -> RagResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

pub fn write_post(dir: &Path, name: &str, text: &str) {
    std::fs::write(dir.join(name), text).expect("Failed to write post");
}

/// Embedding config aimed at `base_url`, no retries worth waiting for.
pub fn embedding_config(base_url: &str) -> EmbeddingConfig {
    EmbeddingConfig {
        api_key: Some("test-key".to_string()),
        base_url: base_url.to_string(),
        dimension: 3,
        ..EmbeddingConfig::default()
    }
}

pub fn generation_config(base_url: &str) -> GenerationConfig {
    GenerationConfig {
        api_key: Some("test-key".to_string()),
        base_url: base_url.to_string(),
        ..GenerationConfig::default()
    }
}

pub fn store_config(database_url: &str) -> StoreConfig {
    StoreConfig {
        database_url: Some(database_url.to_string()),
        auth_token: None,
        ..StoreConfig::default()
    }
}

/// Full config with every HTTP adapter pointed at `base_url`.
pub fn mock_config(base_url: &str) -> Config {
    let mut config = Config {
        embedding: embedding_config(base_url),
        generation: generation_config(base_url),
        store: store_config(base_url),
        ..Config::default()
    };
    config.retry.max_retries = 0;
    config
}
