use std::path::Path;

use anyhow::{bail, Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::{Config, FORBIDDEN_KEY_CHARS};

/// Project config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "blograg.yaml";

/// Prefix for environment overrides, nested with `__`.
pub const ENV_PREFIX: &str = "BLOGRAG_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid top_k: {0}. Must be at least 1")]
    InvalidTopK(usize),

    #[error("Store namespace cannot be empty")]
    EmptyNamespace,

    #[error("Invalid store namespace '{0}': must not contain any of . $ # [ ] /")]
    InvalidNamespace(String),

    #[error("Invalid max_concurrency: {0}. Must be at least 1")]
    InvalidConcurrency(usize),

    #[error("Invalid requests_per_minute: {0}. Must be at least 1")]
    InvalidRateLimit(u32),

    #[error("Invalid timeout for {0}: must be at least 1 second")]
    InvalidTimeout(&'static str),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must not exceed max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `blograg.yaml` in the working directory (optional)
    /// 3. `explicit` config file, when given (must exist)
    /// 4. Environment variables (`BLOGRAG_*` prefix, highest priority)
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(DEFAULT_CONFIG_FILE));

        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.query.top_k == 0 {
            return Err(ConfigError::InvalidTopK(config.query.top_k));
        }

        let namespace = config.store.namespace.trim();
        if namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        if namespace.contains(FORBIDDEN_KEY_CHARS) {
            return Err(ConfigError::InvalidNamespace(namespace.to_string()));
        }

        if config.embedding.max_concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(
                config.embedding.max_concurrency,
            ));
        }

        if config.embedding.requests_per_minute == 0 {
            return Err(ConfigError::InvalidRateLimit(
                config.embedding.requests_per_minute,
            ));
        }

        let timeouts = [
            ("embedding", config.embedding.timeout_secs),
            ("generation", config.generation.timeout_secs),
            ("store", config.store.timeout_secs),
            ("source.github", config.source.github.timeout_secs),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigError::InvalidTimeout(*name));
        }

        if config.retry.initial_backoff_ms > config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.query.reply_language.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "query.reply_language cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
