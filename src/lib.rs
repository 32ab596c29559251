//! Blograg - question answering over a blog's own posts
//!
//! Posts are split into paragraphs, each paragraph is embedded, and the mean
//! of the paragraph vectors is stored as the post's embedding. A question is
//! embedded the same way, ranked against every stored post by cosine
//! similarity, and the best post's text is handed to a generative model as
//! context for the answer.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and the port traits
//! - **Service Layer** (`services`): segmentation, averaging, ranking,
//!   ingestion and query orchestration
//! - **Adapters** (`adapters`): Gemini, Firebase, GitHub and local-disk
//!   implementations of the ports
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging,
//!   retry and service wiring
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use blograg::{AppServices, ConfigLoader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let services = AppServices::new(ConfigLoader::load(None)?)?;
//!     let query = services.query(services.generator()?);
//!     let answer = query.answer("What is a goroutine?", 3).await?;
//!     println!("{}", answer.answer);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{RagError, RagResult};
pub use domain::models::{Config, Document, EmbeddingRecord, EmbeddingVector, SimilarityResult};
pub use domain::ports::{AnswerGenerator, DocumentSource, EmbeddingProvider, VectorStore};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::setup::AppServices;
pub use services::{DocumentEmbedder, IngestionService, QueryService};
