//! In-process vector store.
//!
//! Same contract as the remote store, held in a `BTreeMap` behind an async
//! lock. Nothing survives the process.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{validate_record_id, EmbeddingRecord};
use crate::domain::ports::{RecordSnapshot, VectorStore};

pub struct InMemoryVectorStore {
    namespace: String,
    records: RwLock<BTreeMap<String, EmbeddingRecord>>,
}

impl InMemoryVectorStore {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            records: RwLock::new(BTreeMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn exists(&self, id: &str) -> RagResult<bool> {
        validate_record_id(id)?;
        Ok(self.records.read().await.contains_key(id))
    }

    async fn put(&self, record: &EmbeddingRecord) -> RagResult<()> {
        record.validate()?;
        self.records
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> RagResult<EmbeddingRecord> {
        validate_record_id(id)?;
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RagError::NotFound(id.to_string()))
    }

    async fn get_all(&self) -> RagResult<RecordSnapshot> {
        Ok(self.records.read().await.clone())
    }
}
