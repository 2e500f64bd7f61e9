use async_trait::async_trait;

use super::types::ChatRequest;
use crate::core::errors::ApiError;

/// Hosted model client used for both answer generation and embeddings.
///
/// The trait is the seam for tests: session and conversation logic is
/// exercised against scripted implementations without a live service.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logs (e.g. "openai").
    fn name(&self) -> &str;

    /// Chat completion (non-streaming).
    async fn chat(&self, request: ChatRequest, model_id: &str) -> Result<String, ApiError>;

    /// Embed each input text with the given embedding model.
    async fn embed(&self, inputs: &[String], model_id: &str) -> Result<Vec<Vec<f32>>, ApiError>;
}
