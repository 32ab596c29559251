//! Document-level embedding.
//!
//! A document is segmented into paragraphs, each paragraph is embedded
//! independently, and the document vector is the element-wise arithmetic mean
//! of the paragraph vectors. Paragraph calls run with bounded concurrency;
//! the mean is order-independent, so completion order does not matter.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::debug;

use super::segmenter::segment;
use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::EmbeddingVector;
use crate::domain::ports::EmbeddingProvider;

/// Turns a whole document into one vector.
pub struct DocumentEmbedder {
    provider: Arc<dyn EmbeddingProvider>,
    max_concurrency: usize,
}

impl DocumentEmbedder {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, max_concurrency: usize) -> Self {
        Self {
            provider,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Provider name for diagnostics.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Declared provider dimension, 0 when unknown.
    pub fn dimension(&self) -> usize {
        self.provider.dimension()
    }

    /// Embed `text` as the mean of its paragraph embeddings.
    ///
    /// # Errors
    /// - `EmptyDocument` when segmentation yields no chunks
    /// - `EmbeddingService` when any paragraph call fails (no partial mean)
    /// - `DimensionMismatch` when paragraph vectors disagree in length, or
    ///   disagree with the provider's declared dimension
    pub async fn embed_document(&self, text: &str) -> RagResult<EmbeddingVector> {
        let chunks = segment(text);
        if chunks.is_empty() {
            return Err(RagError::EmptyDocument(
                "no non-empty paragraphs after segmentation".to_string(),
            ));
        }

        debug!(
            provider = self.provider.name(),
            chunks = chunks.len(),
            "embedding document paragraphs"
        );

        let vectors: Vec<EmbeddingVector> = stream::iter(chunks.iter().enumerate())
            .map(|(index, chunk)| async move {
                let vector = self.provider.embed(chunk).await?;
                self.check_chunk(index, &vector)?;
                Ok::<_, RagError>(vector)
            })
            .buffered(self.max_concurrency)
            .try_collect()
            .await?;

        mean_vector(&vectors)
    }

    fn check_chunk(&self, index: usize, vector: &[f32]) -> RagResult<()> {
        if vector.is_empty() {
            return Err(RagError::EmbeddingService(format!(
                "{} returned an empty vector for paragraph {index}",
                self.provider.name()
            )));
        }
        let expected = self.provider.dimension();
        if expected > 0 && vector.len() != expected {
            return Err(RagError::DimensionMismatch {
                id: format!("paragraph {index}"),
                expected,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

/// Element-wise arithmetic mean of equal-length vectors.
///
/// Accumulates in `f64` so long documents do not drift.
pub fn mean_vector(vectors: &[EmbeddingVector]) -> RagResult<EmbeddingVector> {
    let first = vectors
        .first()
        .ok_or_else(|| RagError::EmptyDocument("no vectors to average".to_string()))?;
    let dimension = first.len();

    let mut sums = vec![0f64; dimension];
    for (index, vector) in vectors.iter().enumerate() {
        if vector.len() != dimension {
            return Err(RagError::DimensionMismatch {
                id: format!("paragraph {index}"),
                expected: dimension,
                actual: vector.len(),
            });
        }
        for (sum, value) in sums.iter_mut().zip(vector) {
            *sum += f64::from(*value);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let count = vectors.len() as f64;
    #[allow(clippy::cast_possible_truncation)]
    Ok(sums.into_iter().map(|sum| (sum / count) as f32).collect())
}
