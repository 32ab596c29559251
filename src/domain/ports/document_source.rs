//! Document source port.
//!
//! Yields the raw files that ingestion turns into documents. Listing failures
//! abort a run; a failure fetching one entry only affects that entry.

use async_trait::async_trait;

use crate::domain::errors::RagResult;

/// One file exposed by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// File name, used to derive the document id.
    pub name: String,
    /// Path or URL the content is fetched from.
    pub location: String,
}

impl SourceEntry {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}

#[async_trait]
pub trait DocumentSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Enumerate files, directories expanded. With a `limit`, at most that
    /// many entries are returned and sources may stop walking early.
    async fn list(&self, limit: Option<usize>) -> RagResult<Vec<SourceEntry>>;

    /// Fetch one file's text.
    async fn fetch(&self, entry: &SourceEntry) -> RagResult<String>;
}
