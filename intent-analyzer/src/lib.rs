//! Security-intent analysis: prompt building, the upstream call, and
//! interpretation of the model reply.
//!
//! Public API: [`SecurityAnalyzer::analyze`], which turns an
//! [`AnalysisRequest`] into a [`Verdict`] and never fails outward.

mod analyzer;
mod interpret;
mod model;
mod prompt;
mod verdict;

pub use analyzer::SecurityAnalyzer;
pub use interpret::{ExtractionStrategy, UnknownStrategy, extract_json_object, interpret};
pub use model::{AnalysisRequest, AnalysisResult, Severity, UNKNOWN_LANGUAGE, UnknownSeverity};
pub use prompt::{SYSTEM_PROMPT, build_security_prompt};
pub use verdict::{DegradedReason, PARSE_FAILURE_ISSUE, Verdict};
