//! Application services.
//!
//! Pure functions (segmentation, averaging, ranking) plus the two
//! orchestrating services that sit on top of the domain ports.

pub mod document_embedder;
pub mod ingestion_service;
pub mod markup;
pub mod query_service;
pub mod ranker;
pub mod segmenter;

#[cfg(test)]
pub(crate) mod test_support;

pub use document_embedder::{mean_vector, DocumentEmbedder};
pub use ingestion_service::{IngestFailure, IngestOutcome, IngestionReport, IngestionService};
pub use markup::strip_markup;
pub use query_service::{QueryAnswer, QueryService};
pub use ranker::{cosine_similarity, rank, score, Ranking};
pub use segmenter::{segment, PARAGRAPH_SEPARATOR};
