//! Cosine-similarity ranking.
//!
//! Exhaustive scan over a store snapshot. Candidates are visited in ascending
//! id order and sorted with a stable sort, so equal scores keep ascending-id
//! order and results are reproducible for a fixed snapshot.

use tracing::warn;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{EmbeddingRecord, SimilarityResult};
use crate::domain::ports::RecordSnapshot;

/// Cosine similarity of two equal-length vectors.
///
/// Returns `None` when the lengths differ. A zero-magnitude vector on either
/// side scores `0.0` instead of dividing by zero.
///
/// Sums run in `f64`: squares of finite `f32` components cannot overflow
/// there, so the score stays independent of magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() {
        return None;
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Some(0.0);
    }
    let cosine = (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0);
    #[allow(clippy::cast_possible_truncation)]
    Some(cosine as f32)
}

/// Score one stored record against a query vector.
pub fn score(query: &[f32], record: &EmbeddingRecord) -> RagResult<f32> {
    cosine_similarity(query, &record.vector).ok_or_else(|| RagError::DimensionMismatch {
        id: record.id.clone(),
        expected: query.len(),
        actual: record.dimension(),
    })
}

/// Outcome of one ranking pass.
#[derive(Debug, Default)]
pub struct Ranking {
    /// Best first, at most `top_k` entries.
    pub results: Vec<SimilarityResult>,

    /// Candidates left out because their dimension differs from the query.
    pub skipped: Vec<RagError>,
}

/// Rank every record in `records` against `query` and keep the best `top_k`.
///
/// # Errors
/// - `NoCandidates` when the snapshot is empty
/// - the first `DimensionMismatch` when no candidate could be scored
pub fn rank(query: &[f32], records: &RecordSnapshot, top_k: usize) -> RagResult<Ranking> {
    if records.is_empty() {
        return Err(RagError::NoCandidates);
    }

    let mut ranking = Ranking::default();
    let mut scored = Vec::with_capacity(records.len());
    for record in records.values() {
        match score(query, record) {
            Ok(score) => scored.push(SimilarityResult {
                id: record.id.clone(),
                score,
                content: record.content.clone(),
            }),
            Err(err) => {
                warn!(id = %record.id, error = %err, "skipping candidate");
                ranking.skipped.push(err);
            }
        }
    }

    if scored.is_empty() {
        if let Some(first) = ranking.skipped.into_iter().next() {
            return Err(first);
        }
        return Err(RagError::NoCandidates);
    }

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_k);
    ranking.results = scored;
    Ok(ranking)
}
