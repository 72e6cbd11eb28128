use std::{fmt, str::FromStr};

use crate::error_handler::ConfigError;

/// Chat-completion backend the service talks to.
///
/// Both providers speak the same OpenAI-style `/chat/completions` protocol;
/// the variant only decides which extra request headers are attached.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_provider::LlmProvider;
///
/// let provider: LlmProvider = "openrouter".parse().unwrap();
/// assert_eq!(provider, LlmProvider::OpenRouter);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// OpenRouter gateway (`https://openrouter.ai/api/v1`).
    /// Sends `HTTP-Referer` and `X-Title` attribution headers.
    #[default]
    OpenRouter,
    /// OpenAI or any OpenAI-compatible endpoint.
    OpenAi,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenRouter => f.write_str("OpenRouter"),
            LlmProvider::OpenAi => f.write_str("OpenAI"),
        }
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openrouter" => Ok(LlmProvider::OpenRouter),
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAi),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}
