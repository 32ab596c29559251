//! Embedding provider port for semantic vector generation.
//!
//! Defines the trait for embedding providers that convert one piece of text
//! into a dense vector. Providers must behave as a pure function of their
//! input from the caller's point of view.

use async_trait::async_trait;

use crate::domain::errors::RagResult;
use crate::domain::models::EmbeddingVector;

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name (e.g., "gemini").
    fn name(&self) -> &'static str;

    /// Embedding dimension for this provider/model. 0 when unknown.
    fn dimension(&self) -> usize;

    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> RagResult<EmbeddingVector>;
}
