use std::sync::Arc;

pub mod core;
pub mod error_handler;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use crate::core::{
    app_state::AppState,
    config::{ApiConfig, FailurePolicy},
};
use crate::{
    core::cors::cors_layer,
    error_handler::{AppError, AppResult},
    routes::{ask::ask_question_route::ask_question, health_route::health},
};

/// Builds the HTTP surface: `GET /health`, `POST /ask`, CORS and request tracing.
pub fn app_router(config: &ApiConfig, state: AppState) -> AppResult<Router> {
    let cors = cors_layer(&config.cors_origins)?;

    Ok(Router::new()
        .route("/health", get(health))
        .route("/ask", post(ask_question))
        .with_state(Arc::new(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Binds `config.address` and serves until Ctrl+C.
pub async fn start(config: ApiConfig, state: AppState) -> AppResult<()> {
    let app = app_router(&config, state)?;

    let listener = tokio::net::TcpListener::bind(&config.address)
        .await
        .map_err(AppError::Bind)?;

    info!(
        address = %config.address,
        record_limit = config.record_limit,
        failure_policy = ?config.failure_policy,
        origins = ?config.cors_origins,
        "API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("API stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
