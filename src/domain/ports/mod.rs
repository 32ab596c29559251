//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that adapters must implement:
//! - EmbeddingProvider: text to vector
//! - VectorStore: namespaced record persistence
//! - AnswerGenerator: prompt to text
//! - DocumentSource: raw files for ingestion

pub mod document_source;
pub mod embedding;
pub mod generator;
pub mod vector_store;

pub use document_source::{DocumentSource, SourceEntry};
pub use embedding::EmbeddingProvider;
pub use generator::AnswerGenerator;
pub use vector_store::{RecordSnapshot, VectorStore};
