use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::embedding::EmbeddingTaskType;

/// Main configuration structure for blograg
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Embedding service configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Answer generation service configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Vector store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Where documents are ingested from
    #[serde(default)]
    pub source: SourceConfig,

    /// Ingestion behaviour
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Query behaviour
    #[serde(default)]
    pub query: QueryConfig,

    /// Retry policy for transient upstream failures
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gemini embedding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EmbeddingConfig {
    /// API key. Falls back to `GEMINI_API_KEY`.
    pub api_key: Option<String>,

    pub base_url: String,

    /// Model resource name, e.g. `models/text-embedding-004`
    pub model: String,

    pub task_type: EmbeddingTaskType,

    /// Title attached to document-retrieval requests
    pub title: Option<String>,

    /// Expected vector dimension. 0 disables the check.
    pub dimension: usize,

    pub timeout_secs: u64,

    /// Maximum concurrent per-paragraph embedding calls
    pub max_concurrency: usize,

    /// Client-side request budget
    pub requests_per_minute: u32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: "models/text-embedding-004".to_string(),
            task_type: EmbeddingTaskType::RetrievalDocument,
            title: Some("Embedding of paragraph".to_string()),
            dimension: 768,
            timeout_secs: 30,
            max_concurrency: 4,
            requests_per_minute: 1500,
        }
    }
}

impl EmbeddingConfig {
    /// API key from config or environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
    }
}

/// Gemini text generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GenerationConfig {
    /// API key. Falls back to `GEMINI_API_KEY`.
    pub api_key: Option<String>,

    pub base_url: String,

    pub model: String,

    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: "gemini-pro".to_string(),
            timeout_secs: 120,
        }
    }
}

impl GenerationConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
    }
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

/// Firebase Realtime Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StoreConfig {
    /// Database URL. Falls back to `FIREBASE_URL`.
    pub database_url: Option<String>,

    /// Logical table the records live under
    pub namespace: String,

    /// Database secret or ID token. Falls back to `FIREBASE_AUTH_TOKEN`.
    pub auth_token: Option<String>,

    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            namespace: "blog_embeddings".to_string(),
            auth_token: None,
            timeout_secs: 30,
        }
    }
}

impl StoreConfig {
    pub fn resolve_database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var("FIREBASE_URL").ok())
    }

    pub fn resolve_auth_token(&self) -> Option<String> {
        self.auth_token
            .clone()
            .or_else(|| std::env::var("FIREBASE_AUTH_TOKEN").ok())
    }
}

/// Document source selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Github,
    Local,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub github: GitHubSourceConfig,
    pub local: LocalSourceConfig,
}

/// GitHub repository directory holding the posts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GitHubSourceConfig {
    pub base_url: String,
    pub owner: String,
    pub repo: String,
    /// Directory inside the repository
    pub path: String,
    /// Branch, tag or commit. Repository default when unset.
    pub git_ref: Option<String>,
    /// Falls back to `GITHUB_TOKEN`.
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GitHubSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            owner: "kkdai".to_string(),
            repo: "kkdai.github.io".to_string(),
            path: "_posts".to_string(),
            git_ref: None,
            token: None,
            timeout_secs: 30,
        }
    }
}

impl GitHubSourceConfig {
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LocalSourceConfig {
    pub dir: PathBuf,
}

impl Default for LocalSourceConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("_posts"),
        }
    }
}

/// Ingestion behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct IngestConfig {
    /// Strip HTML markup before embedding
    pub clean_markup: bool,

    /// Persist the (cleaned) text alongside the vector
    pub store_content: bool,

    /// Stop after this many source entries
    pub max_documents: Option<usize>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            clean_markup: true,
            store_content: true,
            max_documents: None,
        }
    }
}

/// Query behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct QueryConfig {
    /// Number of ranked results to return
    pub top_k: usize,

    /// Language the answer should be written in
    pub reply_language: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            reply_language: "zh_tw".to_string(),
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 disables retries)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    2
}

const fn default_initial_backoff_ms() -> u64 {
    500
}

const fn default_max_backoff_ms() -> u64 {
    10_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for stderr
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for rolling JSON log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}
