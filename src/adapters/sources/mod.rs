//! Document sources for ingestion.

pub mod github;
pub mod local;

pub use github::GitHubSource;
pub use local::LocalDirSource;
