use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::{core::app_state::AppState, error_handler::AppError};

/// Header accepted as an alternative to `Authorization: Bearer`.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects requests without the configured access key.
///
/// No-op when `ANALYZE_API_KEY` is not set.
pub async fn require_access_key(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.config.access_key.as_deref() else {
        return next.run(req).await;
    };

    let provided = provided_key(req.headers());
    if provided.is_some_and(|k| key_matches(k, expected)) {
        return next.run(req).await;
    }

    warn!(
        path = %req.uri().path(),
        key_present = provided.is_some(),
        "rejected request with invalid access key"
    );
    AppError::Unauthorized.into_response()
}

// Byte comparison runs in constant time for equal lengths; only the length leaks.
fn key_matches(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

fn provided_key(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    bearer
        .or_else(|| {
            headers
                .get(API_KEY_HEADER)
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
        })
        .filter(|k| !k.is_empty())
}
