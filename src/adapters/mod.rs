//! Infrastructure adapters for external systems.

pub mod firebase;
pub mod gemini;
pub(crate) mod http;
pub mod memory;
pub mod sources;

pub use firebase::FirebaseVectorStore;
pub use gemini::{GeminiEmbeddingProvider, GeminiGenerator};
pub use memory::InMemoryVectorStore;
pub use sources::{GitHubSource, LocalDirSource};
