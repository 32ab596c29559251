//! Gemini `generateContent` answer generator.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{describe, model_resource, Content, API_KEY_HEADER};
use crate::adapters::http::{build_client, send_json};
use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::GenerationConfig;
use crate::domain::ports::AnswerGenerator;
use crate::infrastructure::retry::RetryPolicy;

pub struct GeminiGenerator {
    config: GenerationConfig,
    api_key: Option<String>,
    client: Client,
    retry: RetryPolicy,
}

impl GeminiGenerator {
    pub fn new(config: GenerationConfig, retry: RetryPolicy) -> RagResult<Self> {
        let client = build_client(config.timeout_secs, RagError::GenerationService)?;
        Ok(Self {
            api_key: config.resolve_api_key(),
            config,
            client,
            retry,
        })
    }

    fn api_key(&self) -> RagResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            RagError::GenerationService(
                "Gemini API key not set. Set GEMINI_API_KEY env var or configure generation.api_key."
                    .to_string(),
            )
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model_resource(&self.config.model)
        )
    }
}

#[async_trait]
impl AnswerGenerator for GeminiGenerator {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> RagResult<String> {
        let api_key = self.api_key()?;
        let url = &self.endpoint();
        let body = &GenerateContentRequest {
            contents: vec![Content::text(Some("user"), prompt)],
        };

        let response: GenerateContentResponse = self
            .retry
            .execute(|| async move {
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
                RagError::GenerationService(format!("generateContent failed: {}", describe(&failure)))
            })?;

        let answer = response.into_text()?;
        debug!(chars = answer.len(), "received generated answer");
        Ok(answer)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> RagResult<String> {
        let block_reason = self
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(RagError::GenerationService(match block_reason {
                Some(reason) => format!("prompt was blocked: {reason}"),
                None => "response contained no candidates".to_string(),
            }));
        };

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            return Err(RagError::GenerationService(format!(
                "candidate has no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(text)
    }
}
