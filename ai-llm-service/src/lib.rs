//! Shared LLM client used by the answer generator.
//!
//! Exposes the OpenAI chat-completion service, its model config, the
//! [`CompletionClient`] seam and the unified error type [`AiLlmError`].

pub mod completion;
pub mod config;
pub mod error_handler;
pub mod services;

pub use completion::CompletionClient;
pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind};
pub use services::open_ai_service::OpenAiService;
