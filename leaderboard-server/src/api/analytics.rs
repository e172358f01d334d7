//! Period analytics (admin only)

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use super::CurrentUser;
use crate::aggregation::{PeriodReport, TimeRange, period_report};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/analytics", get(get_analytics))
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(rename = "timeRange")]
    pub time_range: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

/// GET /api/analytics?timeRange=&startDate=&endDate=
pub async fn get_analytics(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<PeriodReport>> {
    user.require_admin()?;

    let range = TimeRange::parse(
        query.time_range.as_deref(),
        query.start_date.as_deref(),
        query.end_date.as_deref(),
    )?;
    let artifacts = state.engine.current().ok_or_else(AppError::no_snapshot)?;

    let settings = state.engine.settings();
    Ok(Json(period_report(
        &artifacts.registry,
        &artifacts.eligible,
        &range,
        state.engine.now(),
        settings.timezone,
    )))
}
