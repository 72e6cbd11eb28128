use serde::Serialize;

/// Response body for `GET /config`.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    /// Upstream model identifier.
    pub model: String,
    pub supported_languages: Vec<&'static str>,
    pub version: &'static str,
    pub author: &'static str,
}
