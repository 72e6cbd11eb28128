use intent_analyzer::AnalysisRequest;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error_handler::AppError;

pub const NO_DATA: &str = "No data provided";
pub const INTENT_AND_CODE_REQUIRED: &str = "Intent and code are required";

/// Request payload for /analyze.
///
/// Fields are lenient: a value of the wrong JSON type reads as absent.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub intent: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub language: Option<String>,
}

fn lenient_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

impl AnalyzeRequest {
    /// Parses and validates a raw `/analyze` body.
    ///
    /// - empty body, or JSON that is not a non-empty object → 400 `No data provided`
    /// - empty or missing `intent` / `code` → 400 `Intent and code are required`
    /// - body that is not JSON at all → 500 with the parser message
    pub fn from_body(body: &[u8]) -> Result<AnalysisRequest, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::BadRequest(NO_DATA));
        }

        let map = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) if !map.is_empty() => map,
            Ok(_) => return Err(AppError::BadRequest(NO_DATA)),
            Err(e) => return Err(AppError::Internal(e.to_string())),
        };

        let req: AnalyzeRequest = serde_json::from_value(Value::Object(map))
            .map_err(|e| AppError::Internal(e.to_string()))?;

        // Whitespace-only text is still text; only "" counts as missing.
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        match (present(req.intent), present(req.code)) {
            (Some(intent), Some(code)) => Ok(AnalysisRequest::new(intent, code, req.language)),
            _ => Err(AppError::BadRequest(INTENT_AND_CODE_REQUIRED)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(body: &str) -> u16 {
        match AnalyzeRequest::from_body(body.as_bytes()) {
            Ok(_) => 200,
            Err(AppError::BadRequest(_)) => 400,
            Err(AppError::Internal(_)) => 500,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn shape_errors_are_400() {
        for body in [
            "",
            "   ",
            "{}",
            "[]",
            "null",
            "42",
            r#"{"code": "x"}"#,
            r#"{"intent": "x"}"#,
            r#"{"intent": "", "code": "x"}"#,
            r#"{"intent": "x", "code": ""}"#,
            r#"{"intent": 5, "code": "x"}"#,
        ] {
            assert_eq!(status_of(body), 400, "body: {body:?}");
        }
    }

    #[test]
    fn whitespace_only_intent_and_code_are_accepted() {
        let r = AnalyzeRequest::from_body(br#"{"intent": " ", "code": "\n\t"}"#).unwrap();
        assert_eq!(r.intent, " ");
        assert_eq!(r.code, "\n\t");
    }

    #[test]
    fn non_json_is_500() {
        assert_eq!(status_of("intent=x&code=y"), 500);
        assert_eq!(status_of("{\"intent\": "), 500);
    }

    #[test]
    fn language_defaults_to_unknown() {
        let r = AnalyzeRequest::from_body(br#"{"intent": "i", "code": "c"}"#).unwrap();
        assert_eq!(r.language, "unknown");

        let r = AnalyzeRequest::from_body(br#"{"intent": "i", "code": "c", "language": null}"#)
            .unwrap();
        assert_eq!(r.language, "unknown");

        let r = AnalyzeRequest::from_body(br#"{"intent": "i", "code": "c", "language": "python"}"#)
            .unwrap();
        assert_eq!(r.language, "python");
        assert_eq!(r.intent, "i");
        assert_eq!(r.code, "c");
    }
}
