//! Role-scoped dashboard reads

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use shared::models::TransactionView;
use std::collections::BTreeSet;

use super::CurrentUser;
use crate::core::ServerState;
use crate::snapshot::{EventFilter, ScopedView, TeamFilter, scope_feed};
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/view", get(get_view))
        .route("/api/transactions", get(get_transactions))
}

/// GET /api/view - 当前角色可见的排行榜与交易流
pub async fn get_view(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ScopedView>> {
    let artifacts = state.engine.current().ok_or_else(AppError::no_snapshot)?;
    Ok(Json(ScopedView::build(&artifacts.snapshot, user.role)))
}

#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    pub event: Option<String>,
    pub team: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionView>,
    /// Team names present in the visible feed, for the filter dropdown
    pub teams: Vec<String>,
}

/// GET /api/transactions?event=&team=
pub async fn get_transactions(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<TransactionsQuery>,
) -> AppResult<Json<TransactionsResponse>> {
    let artifacts = state.engine.current().ok_or_else(AppError::no_snapshot)?;
    let event = EventFilter::parse(query.event.as_deref().unwrap_or("all"));
    let team = TeamFilter::parse(query.team.as_deref().unwrap_or("all"));

    let visible: Vec<&TransactionView> =
        scope_feed(&artifacts.snapshot.recent_transactions, &user.role).collect();

    let teams: BTreeSet<String> = visible
        .iter()
        .map(|t| t.team_name.clone())
        .filter(|name| !name.is_empty())
        .collect();

    let transactions = visible
        .into_iter()
        .filter(|t| event.matches(t) && team.matches(t))
        .cloned()
        .collect();

    Ok(Json(TransactionsResponse {
        transactions,
        teams: teams.into_iter().collect(),
    }))
}
