//! Manual sync

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use shared::models::SyncReport;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/sync", post(trigger_sync))
}

/// POST /api/sync - 同步执行一个周期
///
/// 失败时返回 502 与 `success: false`
pub async fn trigger_sync(State(state): State<ServerState>) -> (StatusCode, Json<SyncReport>) {
    tracing::info!("Manual sync requested");
    let report = state.engine.sync().await;
    let status = if report.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    (status, Json(report))
}
