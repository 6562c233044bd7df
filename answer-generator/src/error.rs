//! Typed error for the answer-generator crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnswerError {
    /// Completion request failed: missing key, transport, status, empty choices.
    #[error(transparent)]
    Llm(#[from] AiLlmError),
}
