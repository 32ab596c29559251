//! Firebase Realtime Database vector store.
//!
//! Records live at `{database_url}/{namespace}/{id}.json`. The REST API
//! returns `null` for absent paths, which maps to "does not exist".

use std::fmt::Display;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::adapters::http::{build_client, send_json, send_text, HttpFailure};
use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{validate_record_id, EmbeddingRecord, EmbeddingVector, StoreConfig};
use crate::domain::ports::{RecordSnapshot, VectorStore};
use crate::infrastructure::retry::RetryPolicy;

pub struct FirebaseVectorStore {
    client: Client,
    database_url: String,
    namespace: String,
    auth_token: Option<String>,
    retry: RetryPolicy,
}

impl FirebaseVectorStore {
    pub fn new(config: &StoreConfig, retry: RetryPolicy) -> RagResult<Self> {
        let database_url = config.resolve_database_url().ok_or_else(|| {
            RagError::Store(
                "Firebase database URL not set. Set FIREBASE_URL env var or configure store.database_url."
                    .to_string(),
            )
        })?;
        let namespace = config.namespace.trim_matches('/').to_string();
        if namespace.is_empty() {
            return Err(RagError::Store("store namespace cannot be empty".to_string()));
        }

        Ok(Self {
            client: build_client(config.timeout_secs, RagError::Store)?,
            database_url: database_url.trim_end_matches('/').to_string(),
            namespace,
            auth_token: config.resolve_auth_token(),
            retry,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/{}.json", self.database_url, self.namespace)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/{}/{}.json", self.database_url, self.namespace, id)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }

    async fn read(&self, url: &str, shallow: bool) -> RagResult<Value> {
        self.retry
            .execute(|| async move {
                let mut request = self.authorized(self.client.get(url));
                if shallow {
                    request = request.query(&[("shallow", "true")]);
                }
                send_json::<Value>(request).await
            })
            .await
            .map_err(|failure| store_error("read", url, &failure))
    }
}

fn store_error(action: &str, url: &str, failure: &HttpFailure) -> RagError {
    // The auth token travels in the query string; only the path is reported.
    let path = url.split('?').next().unwrap_or(url);
    RagError::Store(format!("{action} {path} failed: {failure}"))
}

/// Stored shape. `id` is optional so records written by other tools, keyed
/// only by path, still load.
#[derive(Debug, Deserialize)]
struct StoredRecord {
    id: Option<String>,
    vector: EmbeddingVector,
    #[serde(default)]
    content: Option<String>,
}

fn parse_record(key: &str, value: Value) -> RagResult<EmbeddingRecord> {
    let stored: StoredRecord = serde_json::from_value(value)
        .map_err(|e| RagError::InvalidRecord(format!("record '{key}' is malformed: {e}")))?;
    let id = stored.id.unwrap_or_else(|| key.to_string());
    if id != key {
        return Err(RagError::InvalidRecord(format!(
            "record stored under '{key}' carries id '{id}'"
        )));
    }
    Ok(EmbeddingRecord {
        id,
        vector: stored.vector,
        content: stored.content,
    })
}

fn skip_malformed(key: &str, err: &impl Display) {
    warn!(%key, error = %err, "skipping malformed record");
}

#[async_trait]
impl VectorStore for FirebaseVectorStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn exists(&self, id: &str) -> RagResult<bool> {
        validate_record_id(id)?;
        let value = self.read(&self.record_url(id), true).await?;
        Ok(!value.is_null())
    }

    async fn put(&self, record: &EmbeddingRecord) -> RagResult<()> {
        record.validate()?;
        let url = &self.record_url(&record.id);
        self.retry
            .execute(|| async move {
                send_text(self.authorized(self.client.put(url)).json(record)).await
            })
            .await
            .map_err(|failure| store_error("write", url, &failure))?;
        debug!(id = %record.id, namespace = %self.namespace, "record written");
        Ok(())
    }

    async fn get(&self, id: &str) -> RagResult<EmbeddingRecord> {
        validate_record_id(id)?;
        let value = self.read(&self.record_url(id), false).await?;
        if value.is_null() {
            return Err(RagError::NotFound(id.to_string()));
        }
        parse_record(id, value)
    }

    async fn get_all(&self) -> RagResult<RecordSnapshot> {
        let value = self.read(&self.table_url(), false).await?;
        let entries = match value {
            Value::Null => return Ok(RecordSnapshot::new()),
            Value::Object(entries) => entries,
            other => {
                return Err(RagError::Store(format!(
                    "namespace '{}' does not hold an object of records (got {})",
                    self.namespace,
                    json_kind(&other)
                )))
            }
        };

        let mut snapshot = RecordSnapshot::new();
        for (key, value) in entries {
            match parse_record(&key, value) {
                Ok(record) => {
                    snapshot.insert(key, record);
                }
                Err(err) => skip_malformed(&key, &err),
            }
        }
        debug!(records = snapshot.len(), namespace = %self.namespace, "loaded snapshot");
        Ok(snapshot)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
