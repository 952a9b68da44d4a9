//! Admin dashboard handlers

use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::AppState;
use arena_core::{ActivityLog, DashboardStats};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    limit: Option<i64>,
}

pub async fn activity_logs(
    _admin: AdminUser,
    State(state): State<AppState>,
    query: Result<Query<ActivityQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ActivityLog>>> {
    let Query(query) = query?;
    Ok(Json(state.audit.recent(query.limit).await?))
}

pub async fn stats(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(state.tournament_service.stats().await?))
}
