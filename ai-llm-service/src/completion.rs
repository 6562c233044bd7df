//! Provider-agnostic chat-completion seam.

use async_trait::async_trait;

use crate::error_handler::AiLlmError;

/// A single-turn chat completion: one system message, one user message,
/// raw text back.
///
/// Implemented by [`crate::OpenAiService`]; tests plug in their own.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AiLlmError>;
}
