//! GitHub repository directory as a document source.
//!
//! Walks the contents API breadth-first from the configured path and
//! downloads each file through its `download_url`.

use std::collections::VecDeque;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::adapters::http::{build_client, send_json, send_text};
use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::GitHubSourceConfig;
use crate::domain::ports::{DocumentSource, SourceEntry};
use crate::infrastructure::retry::RetryPolicy;

pub struct GitHubSource {
    client: Client,
    config: GitHubSourceConfig,
    token: Option<String>,
    retry: RetryPolicy,
}

impl GitHubSource {
    pub fn new(config: GitHubSourceConfig, retry: RetryPolicy) -> RagResult<Self> {
        Ok(Self {
            client: build_client(config.timeout_secs, RagError::Source)?,
            token: config.resolve_token(),
            config,
            retry,
        })
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.owner,
            self.config.repo,
            path.trim_matches('/')
        )
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn list_dir(&self, path: &str) -> RagResult<Vec<ContentItem>> {
        let url = &self.contents_url(path);
        let git_ref = self.config.git_ref.as_deref();
        let value: Value = self
            .retry
            .execute(|| async move {
                let mut request = self.request(url);
                if let Some(git_ref) = git_ref {
                    request = request.query(&[("ref", git_ref)]);
                }
                send_json(request).await
            })
            .await
            .map_err(|failure| RagError::Source(format!("listing '{path}' failed: {failure}")))?;

        // A file path yields a single object, a directory an array.
        let items = match value {
            Value::Array(_) => serde_json::from_value(value)?,
            Value::Object(_) => vec![serde_json::from_value(value)?],
            _ => {
                return Err(RagError::Source(format!(
                    "unexpected contents payload for '{path}'"
                )))
            }
        };
        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    download_url: Option<String>,
}

#[async_trait]
impl DocumentSource for GitHubSource {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn list(&self, limit: Option<usize>) -> RagResult<Vec<SourceEntry>> {
        let limit = limit.unwrap_or(usize::MAX);
        let mut pending = VecDeque::from([self.config.path.clone()]);
        let mut entries = Vec::new();

        // Each directory costs one contents call; stop once the cap is met.
        while entries.len() < limit {
            let Some(path) = pending.pop_front() else {
                break;
            };
            for item in self.list_dir(&path).await? {
                match (item.kind.as_str(), item.download_url) {
                    ("dir", _) => pending.push_back(item.path),
                    ("file", Some(download_url)) => {
                        entries.push(SourceEntry::new(item.name, download_url));
                    }
                    (kind, _) => {
                        warn!(path = %item.path, kind, "skipping entry without downloadable content");
                    }
                }
            }
        }

        entries.truncate(limit);
        debug!(
            owner = %self.config.owner,
            repo = %self.config.repo,
            files = entries.len(),
            "listed repository contents"
        );
        Ok(entries)
    }

    async fn fetch(&self, entry: &SourceEntry) -> RagResult<String> {
        let url = entry.location.as_str();
        self.retry
            .execute(|| async move { send_text(self.request(url)).await })
            .await
            .map_err(|failure| {
                RagError::Source(format!("downloading '{}' failed: {failure}", entry.name))
            })
    }
}
