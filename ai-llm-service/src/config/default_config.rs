//! Chat-completion config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `OPENROUTER_API_KEY` = bearer credential (optional; calls fail without it)
//! - `LLM_MODEL`          = model id (default `anthropic/claude-3-sonnet`)
//! - `LLM_BASE_URL`       = API base URL (default `https://openrouter.ai/api/v1`)
//! - `LLM_PROVIDER`       = `openrouter` (default) or `openai`
//! - `LLM_TIMEOUT_SECS`   = request timeout (default 30)
//!
//! Sampling is not configurable: `temperature = 0.3`, `max_tokens = 2000`.

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{Result, parse_opt_u64, validate_http_endpoint},
};

pub const DEFAULT_MODEL: &str = "anthropic/claude-3-sonnet";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const TEMPERATURE: f32 = 0.3;
pub const MAX_TOKENS: u32 = 2000;

const APP_REFERER: &str = "https://github.com/suneetdungrani/sec-intent";
const APP_TITLE: &str = "Security Intent Co-Pilot";

/// Builds the security-review model config from the process environment.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_PROVIDER`
/// - [`ConfigError::InvalidFormat`] if `LLM_BASE_URL` is not http(s)
/// - [`ConfigError::InvalidNumber`] if `LLM_TIMEOUT_SECS` is not a number
pub fn config_from_env() -> Result<LlmModelConfig> {
    config_from_lookup(|name| std::env::var(name).ok())
}

/// Same as [`config_from_env`] but reads variables through `lookup`.
pub fn config_from_lookup<F>(lookup: F) -> Result<LlmModelConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let provider = match non_blank("LLM_PROVIDER") {
        Some(raw) => raw.parse::<LlmProvider>()?,
        None => LlmProvider::default(),
    };

    let model = non_blank("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let endpoint = non_blank("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    validate_http_endpoint("LLM_BASE_URL", endpoint.trim())?;

    let timeout_secs = parse_opt_u64("LLM_TIMEOUT_SECS", lookup("LLM_TIMEOUT_SECS").as_deref())?
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint: endpoint.trim().to_string(),
        api_key: non_blank("OPENROUTER_API_KEY"),
        max_tokens: Some(MAX_TOKENS),
        temperature: Some(TEMPERATURE),
        top_p: None,
        timeout_secs: Some(timeout_secs),
        app_referer: Some(APP_REFERER.to_string()),
        app_title: Some(APP_TITLE.to_string()),
    })
}
