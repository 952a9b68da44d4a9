//! Liveness / readiness probe

use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: &'static str,
    version: &'static str,
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, database, code) = match state.db.ping().await {
        Ok(()) => ("ok", "up", StatusCode::OK),
        Err(e) => {
            error!("Health check failed: {}", e);
            ("degraded", "down", StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
