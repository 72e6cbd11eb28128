use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    core::app_state::{AppState, SERVICE_AUTHOR, SERVICE_VERSION, SUPPORTED_LANGUAGES},
    routes::config::config_response::ConfigResponse,
};

/// Handler: GET /config
///
/// Never exposes the upstream credential or endpoint.
pub async fn config_route(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        model: state.config.llm.model.clone(),
        supported_languages: SUPPORTED_LANGUAGES.to_vec(),
        version: SERVICE_VERSION,
        author: SERVICE_AUTHOR,
    })
}
