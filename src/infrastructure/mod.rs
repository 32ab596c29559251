//! Infrastructure layer
//!
//! Configuration loading, logging setup, retry policy and the wiring that
//! turns a [`Config`](crate::domain::models::Config) into live services.

pub mod config;
pub mod logging;
pub mod retry;
pub mod setup;

pub use config::{ConfigError, ConfigLoader};
pub use logging::LoggerImpl;
pub use retry::{RetryPolicy, Transient};
pub use setup::AppServices;
