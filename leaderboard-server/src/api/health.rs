//! Liveness and status
//!
//! ```json
//! { "status": "online", "timestamp": "...", "message": "...", "lastSync": null }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/status", get(status))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "leaderboard-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
    message: &'static str,
    last_sync: Option<DateTime<Utc>>,
}

pub async fn status(State(state): State<ServerState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online",
        timestamp: state.engine.now(),
        message: "Leaderboard sync service is running",
        last_sync: state.engine.last_sync(),
    })
}
