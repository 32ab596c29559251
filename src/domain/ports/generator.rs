//! Answer generation port.

use async_trait::async_trait;

use crate::domain::errors::RagResult;

/// External text-generation service: prompt in, raw text out.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the service's text unmodified.
    async fn generate(&self, prompt: &str) -> RagResult<String>;
}
