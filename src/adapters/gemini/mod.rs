//! Google Gemini REST adapters.
//!
//! Both endpoints take the API key in the `x-goog-api-key` header and
//! address models as `models/{name}`.

pub mod embedding;
pub mod generation;

pub use embedding::GeminiEmbeddingProvider;
pub use generation::GeminiGenerator;

use serde::{Deserialize, Serialize};

use super::http::HttpFailure;

pub(crate) const API_KEY_HEADER: &str = "x-goog-api-key";

/// Qualify a bare model name with the `models/` prefix.
pub(crate) fn model_resource(model: &str) -> String {
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
    pub parts: Vec<Part<'a>>,
}

impl<'a> Content<'a> {
    pub fn text(role: Option<&'static str>, text: &'a str) -> Self {
        Self {
            role,
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Part<'a> {
    pub text: &'a str,
}

/// Error envelope returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Pull the human-readable message out of an error body, falling back to the
/// raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .ok()
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}

/// Render a failure with the API's own error message when it sent one.
pub(crate) fn describe(failure: &HttpFailure) -> String {
    match failure {
        HttpFailure::Status { status, body } => format!("{status}: {}", error_message(body)),
        other => other.to_string(),
    }
}
