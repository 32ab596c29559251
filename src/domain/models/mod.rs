//! Domain models for the retrieval pipeline.

pub mod config;
pub mod document;
pub mod embedding;

pub use config::{
    Config, EmbeddingConfig, GenerationConfig, GitHubSourceConfig, IngestConfig,
    LocalSourceConfig, LogFormat, LoggingConfig, QueryConfig, RetryConfig, RotationPolicy,
    SourceConfig, SourceKind, StoreConfig,
};
pub use document::{document_id_from_file_name, Document};
pub use embedding::{
    validate_record_id, EmbeddingRecord, EmbeddingTaskType, EmbeddingVector, SimilarityResult,
    FORBIDDEN_KEY_CHARS,
};
