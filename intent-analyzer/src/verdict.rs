use crate::model::{AnalysisResult, Severity};

/// Issue text reported when the model reply holds no usable JSON object.
pub const PARSE_FAILURE_ISSUE: &str = "Failed to parse security analysis";

/// Why an analysis could not produce a model-backed verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedReason {
    /// The reply contained no JSON object that could be read.
    Unparseable,
    /// The upstream call failed (transport, timeout, non-success status, ...).
    Upstream(String),
}

impl DegradedReason {
    /// Human-readable issue line for the failure result.
    pub fn describe(&self) -> String {
        match self {
            DegradedReason::Unparseable => PARSE_FAILURE_ISSUE.to_string(),
            DegradedReason::Upstream(msg) => format!("Analysis failed: {msg}"),
        }
    }
}

/// Outcome of one analysis.
///
/// Callers must go through [`Verdict::into_result`] (or match) to get the
/// wire shape, so the degraded path cannot be silently dropped.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Completed(AnalysisResult),
    Degraded(DegradedReason),
}

impl Verdict {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Verdict::Degraded(_))
    }

    /// Renders the verdict as an [`AnalysisResult`].
    ///
    /// A degraded verdict becomes `isSecure=false`, `severity=error`, one issue
    /// describing the failure, and no suggestions.
    pub fn into_result(self) -> AnalysisResult {
        match self {
            Verdict::Completed(r) => r,
            Verdict::Degraded(reason) => AnalysisResult {
                is_secure: false,
                issues: vec![reason.describe()],
                suggestions: Vec::new(),
                severity: Severity::Error,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_renders_fixed_failure_result() {
        let r = Verdict::Degraded(DegradedReason::Unparseable).into_result();
        assert!(!r.is_secure);
        assert_eq!(r.severity, Severity::Error);
        assert_eq!(r.issues, vec![PARSE_FAILURE_ISSUE.to_string()]);
        assert!(r.suggestions.is_empty());
    }

    #[test]
    fn upstream_failure_names_the_cause() {
        let r = Verdict::Degraded(DegradedReason::Upstream("HTTP 502".into())).into_result();
        assert_eq!(r.issues, vec!["Analysis failed: HTTP 502".to_string()]);
        assert_eq!(r.severity, Severity::Error);
    }
}
