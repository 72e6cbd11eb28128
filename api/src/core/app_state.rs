use std::sync::Arc;

use ai_llm_service::{
    AiLlmError, ChatCompletion, ChatCompletionService, LlmModelConfig,
    config::default_config::config_from_lookup,
};
use intent_analyzer::{ExtractionStrategy, SecurityAnalyzer, UnknownStrategy};
use thiserror::Error;

/// Languages advertised by `GET /config`.
pub const SUPPORTED_LANGUAGES: [&str; 5] = ["javascript", "typescript", "python", "java", "csharp"];
pub const SERVICE_NAME: &str = "Security Intent Co-Pilot";
pub const SERVICE_VERSION: &str = "1.0.0";
pub const SERVICE_AUTHOR: &str = "Suneet Dungrani";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Errors raised while reading startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT `{0}`: expected 1..=65535")]
    InvalidPort(String),

    #[error("invalid ANALYZER_JSON_EXTRACTION: {0}")]
    InvalidStrategy(#[from] UnknownStrategy),

    #[error(transparent)]
    Llm(#[from] AiLlmError),
}

/// Process-wide configuration. Built once at startup, read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `DEBUG=true|1` switches logging to debug.
    pub debug: bool,
    /// When set, `/analyze` requires this key (`Authorization: Bearer` or `X-Api-Key`).
    pub access_key: Option<String>,
    /// JSON extraction used by the response interpreter.
    pub extraction: ExtractionStrategy,
    /// Upstream chat-completion settings (credential, model, endpoint).
    pub llm: LlmModelConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Env: `HOST`, `PORT`, `DEBUG`, `ANALYZE_API_KEY`, `ANALYZER_JSON_EXTRACTION`,
    /// plus the upstream variables read by `ai-llm-service`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match non_blank("PORT") {
            Some(raw) => match raw.parse::<u16>() {
                Ok(p) if p != 0 => p,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        let debug = non_blank("DEBUG")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);

        let extraction = match non_blank("ANALYZER_JSON_EXTRACTION") {
            Some(raw) => raw.parse::<ExtractionStrategy>()?,
            None => ExtractionStrategy::default(),
        };

        Ok(Self {
            host: non_blank("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            debug,
            access_key: non_blank("ANALYZE_API_KEY"),
            extraction,
            llm: config_from_lookup(&lookup)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    pub config: AppConfig,
    pub analyzer: SecurityAnalyzer,
}

impl AppState {
    /// Wires the analyzer to a real chat-completion client built from `config.llm`.
    pub fn from_config(config: AppConfig) -> Result<Arc<Self>, AiLlmError> {
        let client = ChatCompletionService::new(config.llm.clone())?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Wires the analyzer to any [`ChatCompletion`] implementation.
    pub fn with_client(config: AppConfig, client: Arc<dyn ChatCompletion>) -> Arc<Self> {
        let analyzer = SecurityAnalyzer::new(client, config.extraction);
        Arc::new(Self { config, analyzer })
    }
}
