//! Scripted port implementations for service unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::EmbeddingVector;
use crate::domain::ports::{AnswerGenerator, DocumentSource, EmbeddingProvider, SourceEntry};

/// Returns a fixed vector per input text.
pub struct ScriptedEmbedder {
    dimension: usize,
    vectors: HashMap<String, EmbeddingVector>,
    failing: Vec<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: HashMap::new(),
            failing: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with(mut self, text: &str, vector: EmbeddingVector) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }

    pub fn failing_on(mut self, text: &str) -> Self {
        self.failing.push(text.to_string());
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl EmbeddingProvider for ScriptedEmbedder {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> RagResult<EmbeddingVector> {
        self.calls.lock().unwrap().push(text.to_string());
        if self.failing.iter().any(|t| t == text) {
            return Err(RagError::EmbeddingService(format!("quota exceeded for '{text}'")));
        }
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| RagError::EmbeddingService(format!("unscripted text '{text}'")))
    }
}

/// Echoes a canned answer and records every prompt.
pub struct RecordingGenerator {
    answer: String,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl RecordingGenerator {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl AnswerGenerator for RecordingGenerator {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn generate(&self, prompt: &str) -> RagResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

/// Fixed set of named files.
pub struct StaticSource {
    files: Vec<(String, RagResult<String>)>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    pub fn file(mut self, name: &str, text: &str) -> Self {
        self.files.push((name.to_string(), Ok(text.to_string())));
        self
    }

    pub fn unreadable(mut self, name: &str) -> Self {
        self.files
            .push((name.to_string(), Err(RagError::Source(format!("cannot read {name}")))));
        self
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn list(&self, limit: Option<usize>) -> RagResult<Vec<SourceEntry>> {
        Ok(self
            .files
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|(name, _)| SourceEntry::new(name.clone(), format!("mem://{name}")))
            .collect())
    }

    async fn fetch(&self, entry: &SourceEntry) -> RagResult<String> {
        match self.files.iter().find(|(name, _)| *name == entry.name) {
            Some((_, Ok(text))) => Ok(text.clone()),
            Some((name, Err(_))) => Err(RagError::Source(format!("cannot read {name}"))),
            None => Err(RagError::Source(format!("unknown entry {}", entry.name))),
        }
    }
}
