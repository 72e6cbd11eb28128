use std::sync::Arc;

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub use crate::core::app_state::{AppConfig, AppState, ConfigError};
pub use crate::error_handler::{AppError, AppResult};

use crate::{
    middleware_layer::access_guard::require_access_key,
    routes::{
        analyze::analyze_route::analyze_route, config::config_route::config_route,
        health::health_route::health_route,
    },
};

/// Builds the HTTP surface: `/health`, `/config`, `/analyze`.
///
/// Only `/analyze` sits behind the access guard.
pub fn build_router(state: Arc<AppState>) -> Router {
    let analyze = Router::new()
        .route("/analyze", post(analyze_route))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_key,
        ));

    Router::new()
        .route("/health", get(health_route))
        .route("/config", get(config_route))
        .merge(analyze)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Binds `HOST:PORT` and serves until Ctrl+C.
pub async fn start(config: AppConfig) -> AppResult<()> {
    if config.access_key.is_none() {
        warn!("ANALYZE_API_KEY is not set; /analyze is open to any caller");
    }

    let addr = config.bind_address();
    let state = AppState::from_config(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(%addr, "Security Intent Co-Pilot listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
