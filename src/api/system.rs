use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use super::AppState;

#[derive(Serialize)]
struct HealthLiveResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct HealthReadyResponse {
    ready: bool,
    database: bool,
}

/// `GET /health/live`
///
/// Lightweight liveness probe to indicate the API process is running.
pub async fn health_live() -> impl IntoResponse {
    Json(HealthLiveResponse { status: "alive" })
}

/// `GET /health/ready`
///
/// Readiness probe that checks database connectivity.
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Response {
    let db_ready = state.store.ping().await.is_ok();

    let status = if db_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthReadyResponse {
            ready: db_ready,
            database: db_ready,
        }),
    )
        .into_response()
}
