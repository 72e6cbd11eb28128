use crate::config::llm_provider::LlmProvider;

/// Configuration for a chat-completion model invocation.
///
/// Built once at startup and treated as read-only afterwards.
///
/// # Fields
///
/// - `provider`: Which backend to use (OpenRouter or OpenAI-compatible).
/// - `model`: The model identifier (e.g., `"anthropic/claude-3-sonnet"`).
/// - `endpoint`: API base URL; `/chat/completions` is appended to it.
/// - `api_key`: Bearer credential. Calls fail without it, construction does not.
/// - `max_tokens`: Maximum number of tokens to generate.
/// - `temperature`: Sampling temperature.
/// - `top_p`: Nucleus sampling cutoff.
/// - `timeout_secs`: Request timeout in seconds.
/// - `app_referer` / `app_title`: attribution headers sent to OpenRouter.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::OpenRouter,
///     model: "anthropic/claude-3-sonnet".to_string(),
///     endpoint: "https://openrouter.ai/api/v1".to_string(),
///     api_key: Some("sk-or-...".to_string()),
///     max_tokens: Some(2000),
///     temperature: Some(0.3),
///     top_p: None,
///     timeout_secs: Some(30),
///     app_referer: None,
///     app_title: None,
/// };
/// assert_eq!(cfg.timeout_secs, Some(30));
/// ```
#[derive(Clone)]
pub struct LlmModelConfig {
    /// The backend provider.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// API base URL (e.g. `https://openrouter.ai/api/v1`).
    pub endpoint: String,

    /// Optional bearer credential.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,

    /// Value for the `HTTP-Referer` header (OpenRouter only).
    pub app_referer: Option<String>,

    /// Value for the `X-Title` header (OpenRouter only).
    pub app_title: Option<String>,
}

// Hand-written so the credential never ends up in logs.
impl std::fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("timeout_secs", &self.timeout_secs)
            .field("app_referer", &self.app_referer)
            .field("app_title", &self.app_title)
            .finish()
    }
}

impl LlmModelConfig {
    /// Returns `true` when a non-blank API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }
}
