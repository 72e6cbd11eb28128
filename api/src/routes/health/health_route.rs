use axum::Json;
use serde::Serialize;

use crate::core::app_state::SERVICE_NAME;

/// Liveness payload for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Handler: GET /health
///
/// Does not touch the upstream.
pub async fn health_route() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}
