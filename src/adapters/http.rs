//! Shared HTTP plumbing for the REST adapters.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::errors::{RagError, RagResult};
use crate::infrastructure::retry::Transient;

/// Build a client with a per-request timeout. `on_error` picks the error
/// variant of the calling adapter.
pub(crate) fn build_client(timeout_secs: u64, on_error: fn(String) -> RagError) -> RagResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("blograg/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| on_error(format!("failed to build HTTP client: {e}")))
}

/// Why a single HTTP exchange failed.
#[derive(Debug)]
pub(crate) enum HttpFailure {
    /// Connection, TLS or timeout failure; no response was read.
    Network(String),
    /// The server answered with a non-success status.
    Status { status: StatusCode, body: String },
    /// The body could not be decoded into the expected shape.
    Decode(String),
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "request failed: {msg}"),
            Self::Status { status, body } => write!(f, "{status}: {body}"),
            Self::Decode(msg) => write!(f, "unexpected response body: {msg}"),
        }
    }
}

impl Transient for HttpFailure {
    fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            Self::Decode(_) => false,
        }
    }
}

/// Send `request` and return the body text of a successful response.
pub(crate) async fn send_text(request: RequestBuilder) -> Result<String, HttpFailure> {
    let response = request
        .send()
        .await
        .map_err(|e| HttpFailure::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| HttpFailure::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(HttpFailure::Status { status, body });
    }
    Ok(body)
}

/// Send `request` and decode a successful JSON response.
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, HttpFailure> {
    let body = send_text(request).await?;
    serde_json::from_str(&body).map_err(|e| HttpFailure::Decode(e.to_string()))
}
