//! Tournament handlers

use crate::error::{ApiError, ApiResult};
use crate::extractors::AdminUser;
use crate::AppState;
use arena_core::{
    ArenaError, QrCodeUpdate, ResetResult, Tournament, TournamentKey, TournamentSettingsUpdate,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

/// Unknown game or format in the path is a missing tournament, not a bad request
fn parse_key(game_type: &str, tournament_type: &str) -> Result<TournamentKey, ApiError> {
    match (game_type.parse(), tournament_type.parse()) {
        (Ok(game_type), Ok(tournament_type)) => Ok(TournamentKey::new(game_type, tournament_type)),
        _ => Err(ArenaError::tournament_not_found().into()),
    }
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Tournament>>> {
    let tournaments = state.tournament_service.list().await?;
    Ok(Json(tournaments))
}

pub async fn get(
    State(state): State<AppState>,
    Path((game_type, tournament_type)): Path<(String, String)>,
) -> ApiResult<Json<Tournament>> {
    let key = parse_key(&game_type, &tournament_type)?;
    Ok(Json(state.tournament_service.get(key).await?))
}

pub async fn reset(
    admin: AdminUser,
    State(state): State<AppState>,
    payload: Result<Json<TournamentKey>, JsonRejection>,
) -> ApiResult<Json<ResetResult>> {
    let Json(key) = payload?;
    let result = state.tournament_service.reset(key, &admin.username).await?;
    Ok(Json(result))
}

pub async fn update_qr(
    admin: AdminUser,
    State(state): State<AppState>,
    Path((game_type, tournament_type)): Path<(String, String)>,
    payload: Result<Json<QrCodeUpdate>, JsonRejection>,
) -> ApiResult<Json<Tournament>> {
    let key = parse_key(&game_type, &tournament_type)?;
    let Json(req) = payload?;
    let tournament = state
        .tournament_service
        .update_qr_code(key, req.qr_code_url.as_deref(), &admin.username)
        .await?;
    Ok(Json(tournament))
}

pub async fn update_settings(
    admin: AdminUser,
    State(state): State<AppState>,
    Path((game_type, tournament_type)): Path<(String, String)>,
    payload: Result<Json<TournamentSettingsUpdate>, JsonRejection>,
) -> ApiResult<Json<Tournament>> {
    let key = parse_key(&game_type, &tournament_type)?;
    let Json(req) = payload?;
    let tournament = state
        .tournament_service
        .update_settings(key, &req, &admin.username)
        .await?;
    Ok(Json(tournament))
}
