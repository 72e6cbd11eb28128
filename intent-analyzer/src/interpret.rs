//! Turns the model's free-text reply into a [`Verdict`].
//!
//! Two extraction strategies:
//! - [`ExtractionStrategy::Scan`]: walks the top-level `{` positions in order and
//!   keeps the first complete object that carries a verdict key. Prose with stray
//!   braces before the verdict, or a second object after it, is ignored. A reply
//!   that ends inside an object (truncated output) is unparseable.
//! - [`ExtractionStrategy::Span`]: slices from the first `{` to the last `}`
//!   and parses that. Breaks on multiple objects or braces in prose.

use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    model::{AnalysisResult, Severity},
    verdict::{DegradedReason, Verdict},
};

/// How the JSON object is located inside the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionStrategy {
    #[default]
    Scan,
    Span,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown JSON extraction strategy `{0}` (expected `scan` or `span`)")]
pub struct UnknownStrategy(pub String);

impl FromStr for ExtractionStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scan" => Ok(ExtractionStrategy::Scan),
            "span" => Ok(ExtractionStrategy::Span),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

/// Extracts the verdict object from `reply`, if any.
pub fn extract_json_object(reply: &str, strategy: ExtractionStrategy) -> Option<Map<String, Value>> {
    match strategy {
        ExtractionStrategy::Scan => scan_first_object(reply),
        ExtractionStrategy::Span => span_object(reply),
    }
}

fn span_object(reply: &str) -> Option<Map<String, Value>> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&reply[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "brace span is not valid JSON");
            None
        }
    }
}

/// Keys of the verdict object; a candidate must carry at least one.
const VERDICT_KEYS: [&str; 4] = ["isSecure", "issues", "suggestions", "severity"];

fn is_verdict(map: &Map<String, Value>) -> bool {
    VERDICT_KEYS.iter().any(|k| map.contains_key(*k))
}

// Only top-level objects count: a `{` inside a span that was already read
// (or failed to read) is never tried on its own.
fn scan_first_object(reply: &str) -> Option<Map<String, Value>> {
    let mut resume = 0;
    for (start, _) in reply.match_indices('{') {
        if start < resume {
            continue;
        }
        let tail = &reply[start..];
        let mut stream = serde_json::Deserializer::from_str(tail).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Object(map))) if is_verdict(&map) => return Some(map),
            Some(Ok(_)) => resume = start + stream.byte_offset(),
            // The object runs to the end of the reply (e.g. truncated output);
            // every later `{` is nested inside it.
            Some(Err(e)) if e.is_eof() => {
                debug!(offset = start, error = %e, "reply ends inside a JSON object");
                return None;
            }
            Some(Err(e)) => resume = start + error_offset(tail, e.line(), e.column()),
            None => return None,
        }
    }
    None
}

/// Byte offset of a serde_json error position (1-based line and column).
fn error_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}

/// Interprets a model reply. Never fails outward: anything unreadable is
/// [`DegradedReason::Unparseable`].
///
/// Absent or wrong-typed keys fall back to `isSecure=false`, `issues=[]`,
/// `suggestions=[]`, `severity=warning`.
pub fn interpret(reply: &str, strategy: ExtractionStrategy) -> Verdict {
    match extract_json_object(reply, strategy) {
        Some(obj) => Verdict::Completed(normalize(&obj)),
        None => {
            warn!(
                reply_len = reply.len(),
                ?strategy,
                "failed to parse security analysis from model reply"
            );
            Verdict::Degraded(DegradedReason::Unparseable)
        }
    }
}

fn normalize(obj: &Map<String, Value>) -> AnalysisResult {
    AnalysisResult {
        is_secure: obj.get("isSecure").and_then(Value::as_bool).unwrap_or(false),
        issues: string_list(obj.get("issues")),
        suggestions: string_list(obj.get("suggestions")),
        severity: obj
            .get("severity")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Severity>().ok())
            .unwrap_or_default(),
    }
}

// Non-string items keep their JSON text.
fn string_list(v: Option<&Value>) -> Vec<String> {
    match v {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}
