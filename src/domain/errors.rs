//! Domain errors for the blograg retrieval pipeline.

use thiserror::Error;

/// Errors that can occur while embedding, storing, ranking or generating.
#[derive(Debug, Error)]
pub enum RagError {
    /// The upstream embedding call failed (network, auth, quota, bad payload).
    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    /// Segmentation left nothing to embed.
    #[error("Document has no embeddable content: {0}")]
    EmptyDocument(String),

    /// Two vectors that must be compared or averaged have different lengths.
    #[error("Dimension mismatch for '{id}': expected {expected}, got {actual}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },

    /// Persistence I/O failed.
    #[error("Store error: {0}")]
    Store(String),

    /// The requested record id is absent from the store.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Ranking was asked to run against an empty store.
    #[error("No embeddings found in the store")]
    NoCandidates,

    /// The generation call failed or returned no usable candidate.
    #[error("Generation service error: {0}")]
    GenerationService(String),

    /// The document source could not list or fetch an item.
    #[error("Document source error: {0}")]
    Source(String),

    /// A record failed validation at the store boundary.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RagError {
    /// True for the "no data" outcome, as opposed to a broken system.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoCandidates)
    }
}

pub type RagResult<T> = Result<T, RagError>;

impl From<serde_json::Error> for RagError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
