//! Vector store port.
//!
//! A namespaced key-value store mapping a document id to its
//! [`EmbeddingRecord`]. Every operation is remote I/O in production; failures
//! surface as [`RagError::Store`](crate::domain::errors::RagError::Store).

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::errors::RagResult;
use crate::domain::models::EmbeddingRecord;

/// Full snapshot of a namespace, ordered by ascending id.
pub type RecordSnapshot = BTreeMap<String, EmbeddingRecord>;

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Logical table the records live under.
    fn namespace(&self) -> &str;

    /// True iff a record with this id is persisted.
    async fn exists(&self, id: &str) -> RagResult<bool>;

    /// Upsert. Last write wins for the same id.
    async fn put(&self, record: &EmbeddingRecord) -> RagResult<()>;

    /// Fetch one record, or `RagError::NotFound`.
    async fn get(&self, id: &str) -> RagResult<EmbeddingRecord>;

    /// Full-table scan.
    async fn get_all(&self) -> RagResult<RecordSnapshot>;
}
