//! Default LLM config loaded from environment variables.
//!
//! Only OpenAI-compatible chat-completion APIs are supported (OpenAI itself,
//! OpenRouter, local proxies exposing `/v1/chat/completions`).
//!
//! # Environment variables
//!
//! - `LLM_API_URL`       = API base URL (default `https://openrouter.ai/api`)
//! - `LLM_API_KEY`       = bearer token (optional; absent means "not configured")
//! - `LLM_MODEL`         = model identifier (default `gpt-3.5-turbo`)
//! - `LLM_MAX_TOKENS`    = max tokens (u32, default 2000)
//! - `LLM_TEMPERATURE`   = sampling temperature (f32 in `0.0..=2.0`, default 0.7)
//! - `LLM_TIMEOUT_SECS`  = request timeout (u64, default 60)
//! - `LLM_HTTP_REFERER`  = `HTTP-Referer` header (default `http://localhost:9876`)
//! - `LLM_APP_TITLE`     = `X-Title` header (default `EdTech Question Generator`)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_f32, env_opt_u32, env_opt_u64,
        validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_HTTP_REFERER: &str = "http://localhost:9876";
pub const DEFAULT_APP_TITLE: &str = "EdTech Question Generator";

/// Constructs the chat-completion config used for question generation.
///
/// A missing `LLM_API_KEY` is **not** an error here: the service still starts
/// and generation degrades to placeholder questions until a key is provided.
///
/// # Errors
///
/// - [`ConfigError::InvalidFormat`] if `LLM_API_URL` has no http/https scheme
/// - [`ConfigError::InvalidNumber`] if a numeric variable does not parse
/// - [`ConfigError::OutOfRange`] if `LLM_TEMPERATURE` is outside `0.0..=2.0`
/// - [`ConfigError::EmptyModel`] if `LLM_MODEL` is set to whitespace only
pub fn config_openai_chat() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = env_opt("LLM_API_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    validate_http_endpoint("LLM_API_URL", &endpoint)?;

    let model = match std::env::var("LLM_MODEL") {
        Ok(v) if v.trim().is_empty() => return Err(ConfigError::EmptyModel.into()),
        Ok(v) => v.trim().to_string(),
        Err(_) => DEFAULT_MODEL.to_string(),
    };

    let temperature = env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);
    validate_range_f32("temperature", temperature, 0.0, 2.0)?;

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key: env_opt("LLM_API_KEY"),
        max_tokens: Some(env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS)),
        temperature: Some(temperature),
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        http_referer: Some(
            env_opt("LLM_HTTP_REFERER").unwrap_or_else(|| DEFAULT_HTTP_REFERER.to_string()),
        ),
        app_title: Some(env_opt("LLM_APP_TITLE").unwrap_or_else(|| DEFAULT_APP_TITLE.to_string())),
    })
}
