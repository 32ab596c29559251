//! Embedding domain models
//!
//! The persisted record schema and the per-query similarity results. The
//! record shape `{id, vector, content?}` is the on-wire schema of the vector
//! store and must stay stable for round-trip correctness.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{RagError, RagResult};

/// A fixed-dimension embedding. Dimensionality is set by the embedding model.
pub type EmbeddingVector = Vec<f32>;

/// Characters the key-value backends reject inside a key.
pub const FORBIDDEN_KEY_CHARS: [char; 6] = ['.', '$', '#', '[', ']', '/'];

/// Task mode sent to the embedding service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingTaskType {
    /// Embeddings of documents that will be retrieved later.
    #[default]
    RetrievalDocument,
    /// Embeddings of search queries.
    RetrievalQuery,
    SemanticSimilarity,
}

impl EmbeddingTaskType {
    /// Wire name used by the Gemini API.
    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::RetrievalDocument => "RETRIEVAL_DOCUMENT",
            Self::RetrievalQuery => "RETRIEVAL_QUERY",
            Self::SemanticSimilarity => "SEMANTIC_SIMILARITY",
        }
    }

    /// Only document retrieval accepts a title.
    pub fn accepts_title(self) -> bool {
        matches!(self, Self::RetrievalDocument)
    }
}

impl std::fmt::Display for EmbeddingTaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// Unit of persistence and retrieval: one per document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// Matches `Document::id`.
    pub id: String,

    /// Document-level embedding (mean of the paragraph embeddings).
    pub vector: EmbeddingVector,

    /// Cleaned document text used as generation context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl EmbeddingRecord {
    pub fn new(id: impl Into<String>, vector: EmbeddingVector) -> Self {
        Self {
            id: id.into(),
            vector,
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    /// Boundary validation applied before a record is written.
    pub fn validate(&self) -> RagResult<()> {
        validate_record_id(&self.id)?;
        if self.vector.is_empty() {
            return Err(RagError::InvalidRecord(format!(
                "record '{}' has an empty vector",
                self.id
            )));
        }
        if let Some(pos) = self.vector.iter().position(|v| !v.is_finite()) {
            return Err(RagError::InvalidRecord(format!(
                "record '{}' has a non-finite value at index {pos}",
                self.id
            )));
        }
        Ok(())
    }
}

/// Reject ids the store cannot use as keys.
pub fn validate_record_id(id: &str) -> RagResult<()> {
    if id.trim().is_empty() {
        return Err(RagError::InvalidRecord("record id cannot be empty".to_string()));
    }
    if let Some(c) = id.chars().find(|c| FORBIDDEN_KEY_CHARS.contains(c)) {
        return Err(RagError::InvalidRecord(format!(
            "record id '{id}' contains forbidden character '{c}'"
        )));
    }
    Ok(())
}

/// One ranked candidate. Produced fresh per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub id: String,

    /// Cosine similarity in [-1, 1]; higher is closer.
    pub score: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization_shape() {
        let record = EmbeddingRecord::new("post", vec![0.25, -1.0]).with_content("Hello");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "post", "vector": [0.25, -1.0], "content": "Hello"})
        );
    }

    #[test]
    fn test_record_without_content_omits_field() {
        let record = EmbeddingRecord::new("post", vec![1.0]);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("content"));

        let back: EmbeddingRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_validate_rejects_empty_vector() {
        let record = EmbeddingRecord::new("post", vec![]);
        assert!(matches!(record.validate(), Err(RagError::InvalidRecord(_))));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let record = EmbeddingRecord::new("post", vec![0.1, f32::NAN]);
        assert!(matches!(record.validate(), Err(RagError::InvalidRecord(_))));
    }

    #[test]
    fn test_validate_record_id() {
        assert!(validate_record_id("2024-01-01-rust").is_ok());
        assert!(validate_record_id("").is_err());
        assert!(validate_record_id("a/b").is_err());
        assert!(validate_record_id("a.b").is_err());
        assert!(validate_record_id("price$").is_err());
    }

    #[test]
    fn test_task_type_wire_names() {
        assert_eq!(EmbeddingTaskType::RetrievalDocument.as_api_str(), "RETRIEVAL_DOCUMENT");
        assert_eq!(EmbeddingTaskType::RetrievalQuery.to_string(), "RETRIEVAL_QUERY");
        assert!(EmbeddingTaskType::RetrievalDocument.accepts_title());
        assert!(!EmbeddingTaskType::SemanticSimilarity.accepts_title());
    }
}
