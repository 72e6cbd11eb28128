pub mod chat_completion_service;

use async_trait::async_trait;

use crate::error_handler::AiLlmError;

/// A single-shot chat completion backend.
///
/// Object safe so callers can hold `Arc<dyn ChatCompletion>` and swap in a
/// stub for tests.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Sends `prompt` as the user message (after an optional `system` message)
    /// and returns the first choice's content verbatim.
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError>;

    /// Model identifier used for requests.
    fn model(&self) -> &str;
}
