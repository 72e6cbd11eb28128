//! Chat-completion client used by the security-intent service.
//!
//! - [`services::chat_completion_service::ChatCompletionService`]: one POST per call,
//!   bounded timeout, no retry.
//! - [`services::ChatCompletion`]: object-safe seam for callers and test stubs.
//! - [`config::default_config::config_from_env`]: model config from the environment.
//! - [`telemetry`]: library-scoped tracing layer.

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind};
pub use services::{ChatCompletion, chat_completion_service::ChatCompletionService};
