//! Gemini `embedContent` provider.

use std::num::NonZeroU32;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{describe, model_resource, Content, API_KEY_HEADER};
use crate::adapters::http::{build_client, send_json};
use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{EmbeddingConfig, EmbeddingVector};
use crate::domain::ports::EmbeddingProvider;
use crate::infrastructure::retry::RetryPolicy;

/// Gemini embedding provider.
///
/// One request per text. Requests are throttled client-side to
/// `requests_per_minute` and retried on rate limiting and server errors.
pub struct GeminiEmbeddingProvider {
    config: EmbeddingConfig,
    api_key: Option<String>,
    client: Client,
    retry: RetryPolicy,
    limiter: DefaultDirectRateLimiter,
}

impl GeminiEmbeddingProvider {
    pub fn new(config: EmbeddingConfig, retry: RetryPolicy) -> RagResult<Self> {
        let client = build_client(config.timeout_secs, RagError::EmbeddingService)?;
        let rpm = NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN);
        Ok(Self {
            api_key: config.resolve_api_key(),
            limiter: RateLimiter::direct(Quota::per_minute(rpm)),
            config,
            client,
            retry,
        })
    }

    fn api_key(&self) -> RagResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            RagError::EmbeddingService(
                "Gemini API key not set. Set GEMINI_API_KEY env var or configure embedding.api_key."
                    .to_string(),
            )
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:embedContent",
            self.config.base_url.trim_end_matches('/'),
            model_resource(&self.config.model)
        )
    }

    fn request_body<'a>(&'a self, text: &'a str) -> EmbedContentRequest<'a> {
        let task_type = self.config.task_type;
        EmbedContentRequest {
            model: model_resource(&self.config.model),
            content: Content::text(None, text),
            task_type: task_type.as_api_str(),
            title: self
                .config
                .title
                .as_deref()
                .filter(|_| task_type.accepts_title()),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    async fn embed(&self, text: &str) -> RagResult<EmbeddingVector> {
        let api_key = self.api_key()?;
        let url = &self.endpoint();
        let body = &self.request_body(text);

        let response: EmbedContentResponse = self
            .retry
            .execute(|| async move {
                self.limiter.until_ready().await;
                send_json(
                    self.client
                        .post(url)
                        .header(API_KEY_HEADER, api_key)
                        .json(body),
                )
                .await
            })
            .await
            .map_err(|failure| {
                RagError::EmbeddingService(format!("embedContent failed: {}", describe(&failure)))
            })?;

        let values = response.embedding.values;
        debug!(dimension = values.len(), chars = text.len(), "received embedding");
        Ok(values)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: String,
    content: Content<'a>,
    task_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    #[serde(default)]
    values: Vec<f32>,
}
