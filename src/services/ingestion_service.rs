//! Ingestion: source files to stored embedding records.
//!
//! Each document goes through an existence check, optional markup stripping,
//! document embedding and a single `put`. Failures are isolated per document
//! and collected into an [`IngestionReport`]; only a failure to list the
//! source aborts the run.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use super::document_embedder::DocumentEmbedder;
use super::markup::strip_markup;
use crate::domain::errors::RagResult;
use crate::domain::models::{
    document_id_from_file_name, validate_record_id, Document, EmbeddingRecord, IngestConfig,
};
use crate::domain::ports::{DocumentSource, SourceEntry, VectorStore};

/// What happened to one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestOutcome {
    Stored,
    /// A record with this id already existed; nothing was embedded.
    AlreadyPresent,
}

/// One document that could not be ingested.
#[derive(Debug, Clone, Serialize)]
pub struct IngestFailure {
    /// Source file name.
    pub entry: String,
    pub error: String,
}

/// Summary of an ingestion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestionReport {
    pub stored: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<IngestFailure>,
}

impl IngestionReport {
    pub fn total(&self) -> usize {
        self.stored.len() + self.skipped.len() + self.failed.len()
    }
}

pub struct IngestionService {
    embedder: Arc<DocumentEmbedder>,
    store: Arc<dyn VectorStore>,
    config: IngestConfig,
}

impl IngestionService {
    pub fn new(
        embedder: Arc<DocumentEmbedder>,
        store: Arc<dyn VectorStore>,
        config: IngestConfig,
    ) -> Self {
        Self {
            embedder,
            store,
            config,
        }
    }

    /// Build a [`Document`] from a source file, stripping markup if enabled.
    pub fn prepare(&self, file_name: &str, raw_text: String) -> RagResult<Document> {
        let document = Document::from_file_name(file_name, raw_text)?;
        validate_record_id(&document.id)?;
        if self.config.clean_markup {
            let cleaned = strip_markup(&document.raw_text);
            return Ok(document.with_cleaned_text(cleaned));
        }
        Ok(document)
    }

    /// Embed and store one document unless its id is already present.
    ///
    /// Existing records are never overwritten by this path.
    #[instrument(skip(self, document), fields(id = %document.id))]
    pub async fn ingest_document(&self, document: &Document) -> RagResult<IngestOutcome> {
        if self.store.exists(&document.id).await? {
            info!("document already embedded, skipping");
            return Ok(IngestOutcome::AlreadyPresent);
        }
        self.store_document(document).await?;
        Ok(IngestOutcome::Stored)
    }

    /// Ingest every entry `source` lists, up to `max_documents`.
    pub async fn ingest_all(&self, source: &dyn DocumentSource) -> RagResult<IngestionReport> {
        let mut entries = source.list(self.config.max_documents).await?;
        if let Some(limit) = self.config.max_documents {
            entries.truncate(limit);
        }
        info!(
            source = source.name(),
            namespace = self.store.namespace(),
            entries = entries.len(),
            "starting ingestion"
        );

        let mut report = IngestionReport::default();
        for entry in &entries {
            match self.ingest_entry(source, entry).await {
                Ok((id, IngestOutcome::Stored)) => report.stored.push(id),
                Ok((id, IngestOutcome::AlreadyPresent)) => report.skipped.push(id),
                Err(err) => {
                    warn!(entry = %entry.name, error = %err, "failed to ingest document");
                    report.failed.push(IngestFailure {
                        entry: entry.name.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        info!(
            stored = report.stored.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "ingestion finished"
        );
        Ok(report)
    }

    /// Existence is checked before fetching so known posts are not downloaded.
    async fn ingest_entry(
        &self,
        source: &dyn DocumentSource,
        entry: &SourceEntry,
    ) -> RagResult<(String, IngestOutcome)> {
        let id = document_id_from_file_name(&entry.name)?;
        validate_record_id(&id)?;
        if self.store.exists(&id).await? {
            info!(%id, "document already embedded, skipping");
            return Ok((id, IngestOutcome::AlreadyPresent));
        }

        let raw_text = source.fetch(entry).await?;
        let document = self.prepare(&entry.name, raw_text)?;
        self.store_document(&document).await?;
        Ok((id, IngestOutcome::Stored))
    }

    async fn store_document(&self, document: &Document) -> RagResult<()> {
        let text = document.embeddable_text();
        let vector = self.embedder.embed_document(text).await?;
        let mut record = EmbeddingRecord::new(document.id.clone(), vector);
        if self.config.store_content {
            record = record.with_content(text);
        }
        self.store.put(&record).await?;
        info!(id = %document.id, dimension = record.dimension(), "stored embedding");
        Ok(())
    }
}
