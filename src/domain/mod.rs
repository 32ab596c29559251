//! Domain layer for the blograg retrieval pipeline
//!
//! Records, documents, configuration, errors and the port traits that the
//! adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{RagError, RagResult};
