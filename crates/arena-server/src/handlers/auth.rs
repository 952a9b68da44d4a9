//! Admin authentication handlers

use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::AppState;
use arena_core::{AdminInfo, AdminLogin, ChangePassword, LoginResponse};
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use tracing::{info, warn};

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<AdminLogin>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload?;
    info!("Login attempt for: {}", req.username);

    let response = state
        .auth_service
        .login(&req.username, &req.password)
        .await
        .map_err(|e| {
            warn!("Login failed for {}: {}", req.username, e);
            e
        })?;

    info!("Login successful for: {}", req.username);
    Ok(Json(response))
}

pub async fn logout(admin: AdminUser, State(state): State<AppState>) -> StatusCode {
    state.auth_service.logout(&admin.claims);
    StatusCode::NO_CONTENT
}

pub async fn me(admin: AdminUser, State(state): State<AppState>) -> ApiResult<Json<AdminInfo>> {
    let info = state.auth_service.current_admin(&admin.admin_id).await?;
    Ok(Json(info))
}

pub async fn change_password(
    admin: AdminUser,
    State(state): State<AppState>,
    payload: Result<Json<ChangePassword>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(req) = payload?;
    state
        .auth_service
        .change_password(&admin.admin_id, &req.current_password, &req.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
