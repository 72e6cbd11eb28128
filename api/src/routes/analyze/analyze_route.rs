//! POST /analyze: reviews code against a stated security intent.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use intent_analyzer::AnalysisResult;
use tracing::{info, instrument};

use crate::{
    core::app_state::AppState, error_handler::AppResult,
    routes::analyze::analyze_request::AnalyzeRequest,
};

/// Handler: POST /analyze
///
/// A degraded analysis (upstream down, unreadable reply) is still a 200;
/// callers inspect `severity`/`issues`, not the status code.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:5000/analyze \
///   -H 'content-type: application/json' \
///   -d '{"intent":"must validate input","code":"function test(x){return x;}","language":"javascript"}'
/// ```
#[instrument(name = "analyze_route", skip_all, fields(body_len = body.len()))]
pub async fn analyze_route(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<AnalysisResult>> {
    let req = AnalyzeRequest::from_body(&body)?;

    let verdict = state.analyzer.analyze(&req).await;
    info!(
        language = %req.language,
        degraded = verdict.is_degraded(),
        "analysis served"
    );

    Ok(Json(verdict.into_result()))
}
