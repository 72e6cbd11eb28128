use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language tag used when the caller does not name one.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// One (intent, code, language) triple to review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Natural-language security property the code should satisfy.
    pub intent: String,
    /// Source code under review, embedded verbatim in the prompt.
    pub code: String,
    /// Language tag for the code fence and best-practice hints.
    pub language: String,
}

impl AnalysisRequest {
    /// Builds a request; a blank `language` becomes [`UNKNOWN_LANGUAGE`].
    pub fn new(
        intent: impl Into<String>,
        code: impl Into<String>,
        language: Option<impl Into<String>>,
    ) -> Self {
        let language = language
            .map(Into::into)
            .filter(|l: &String| !l.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());
        Self {
            intent: intent.into(),
            code: code.into(),
            language,
        }
    }
}

/// How serious the findings are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    #[default]
    Warning,
    Info,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown severity: {0}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}

/// The verdict returned to callers. Always fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_secure: bool,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub severity: Severity,
}
