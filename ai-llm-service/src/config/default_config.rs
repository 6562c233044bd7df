//! Default LLM config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY`   = API key (optional here; completions fail without it)
//! - `OPENAI_URL`       = API base, default `https://api.openai.com`
//! - `OPENAI_MODEL`     = model, default `gpt-4o-mini`
//! - `LLM_MAX_TOKENS`   = max generated tokens (u32), default `300`
//! - `LLM_TEMPERATURE`  = sampling temperature (f32, `0.0..=2.0`), default `0.4`
//! - `LLM_TIMEOUT_SECS` = request timeout (u64), unset means no timeout

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_f32, env_opt_u32, env_opt_u64,
        validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Constructs the chat config used by the support agent.
///
/// # Errors
///
/// - [`ConfigError::InvalidFormat`] if `OPENAI_URL` has no http/https scheme
/// - [`ConfigError::InvalidNumber`] if a numeric variable does not parse
/// - [`ConfigError::OutOfRange`] if the temperature is outside `0.0..=2.0`
/// - [`ConfigError::EmptyModel`] if `OPENAI_MODEL` is set to whitespace
pub fn config_openai_chat() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = env_opt("OPENAI_URL").unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string());
    validate_http_endpoint("OPENAI_URL", endpoint.trim())?;

    let model = match std::env::var("OPENAI_MODEL") {
        Ok(m) if m.trim().is_empty() => return Err(ConfigError::EmptyModel.into()),
        Ok(m) => m.trim().to_string(),
        Err(_) => DEFAULT_OPENAI_MODEL.to_string(),
    };

    let temperature = env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);
    validate_range_f32("temperature", temperature, 0.0, 2.0)?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model,
        endpoint,
        api_key: env_opt("OPENAI_API_KEY"),
        max_tokens: Some(env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS)),
        temperature: Some(temperature),
        timeout_secs: env_opt_u64("LLM_TIMEOUT_SECS")?,
    })
}
