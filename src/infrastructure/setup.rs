//! Service wiring
//!
//! Builds the adapters named by the configuration and hands them to the
//! services as trait objects. Built once per process.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::firebase::FirebaseVectorStore;
use crate::adapters::gemini::{GeminiEmbeddingProvider, GeminiGenerator};
use crate::adapters::sources::{GitHubSource, LocalDirSource};
use crate::domain::models::{Config, SourceKind};
use crate::domain::ports::{AnswerGenerator, DocumentSource, EmbeddingProvider, VectorStore};
use crate::infrastructure::retry::RetryPolicy;
use crate::services::{DocumentEmbedder, IngestionService, QueryService};

/// Everything a command needs, behind the domain ports.
pub struct AppServices {
    pub config: Config,
    pub store: Arc<dyn VectorStore>,
    pub embedder: Arc<DocumentEmbedder>,
}

impl AppServices {
    /// Build the store and embedder. The generator and the document source
    /// are built on demand by the commands that need them.
    pub fn new(config: Config) -> Result<Self> {
        let retry = RetryPolicy::from(&config.retry);

        let store: Arc<dyn VectorStore> = Arc::new(
            FirebaseVectorStore::new(&config.store, retry.clone())
                .context("Failed to configure the vector store")?,
        );

        let provider: Arc<dyn EmbeddingProvider> = Arc::new(
            GeminiEmbeddingProvider::new(config.embedding.clone(), retry)
                .context("Failed to configure the embedding provider")?,
        );
        let embedder = Arc::new(DocumentEmbedder::new(
            provider,
            config.embedding.max_concurrency,
        ));

        Ok(Self {
            config,
            store,
            embedder,
        })
    }

    /// Wire explicit adapters, bypassing the configured ones.
    pub fn with_parts(
        config: Config,
        store: Arc<dyn VectorStore>,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        let embedder = Arc::new(DocumentEmbedder::new(
            provider,
            config.embedding.max_concurrency,
        ));
        Self {
            config,
            store,
            embedder,
        }
    }

    fn retry(&self) -> RetryPolicy {
        RetryPolicy::from(&self.config.retry)
    }

    pub fn generator(&self) -> Result<Arc<dyn AnswerGenerator>> {
        let generator = GeminiGenerator::new(self.config.generation.clone(), self.retry())
            .context("Failed to configure the answer generator")?;
        Ok(Arc::new(generator))
    }

    /// The configured source, or a local directory when `local_dir` is given.
    pub fn source(&self, local_dir: Option<PathBuf>) -> Result<Box<dyn DocumentSource>> {
        if let Some(dir) = local_dir {
            return Ok(Box::new(LocalDirSource::new(dir)));
        }
        match self.config.source.kind {
            SourceKind::Local => Ok(Box::new(LocalDirSource::new(
                self.config.source.local.dir.clone(),
            ))),
            SourceKind::Github => {
                let source = GitHubSource::new(self.config.source.github.clone(), self.retry())
                    .context("Failed to configure the GitHub source")?;
                Ok(Box::new(source))
            }
        }
    }

    pub fn ingestion(&self, max_documents: Option<usize>) -> IngestionService {
        let mut ingest = self.config.ingest.clone();
        if max_documents.is_some() {
            ingest.max_documents = max_documents;
        }
        IngestionService::new(Arc::clone(&self.embedder), Arc::clone(&self.store), ingest)
    }

    pub fn query(&self, generator: Arc<dyn AnswerGenerator>) -> QueryService {
        QueryService::new(
            Arc::clone(&self.embedder),
            Arc::clone(&self.store),
            generator,
            self.config.query.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::StoreConfig;

    fn config_with_store(url: &str) -> Config {
        Config {
            store: StoreConfig {
                database_url: Some(url.to_string()),
                ..StoreConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_builds_with_database_url() {
        let services = AppServices::new(config_with_store("https://demo.firebaseio.com")).unwrap();
        assert_eq!(services.store.namespace(), "blog_embeddings");
        assert_eq!(services.embedder.provider_name(), "gemini");
    }

    #[test]
    fn test_local_dir_override_wins() {
        let services = AppServices::new(config_with_store("https://demo.firebaseio.com")).unwrap();
        let source = services.source(Some(PathBuf::from("posts"))).unwrap();
        assert_eq!(source.name(), "local");
    }

    #[test]
    fn test_default_source_is_github() {
        let services = AppServices::new(config_with_store("https://demo.firebaseio.com")).unwrap();
        assert_eq!(services.source(None).unwrap().name(), "github");
    }
}
