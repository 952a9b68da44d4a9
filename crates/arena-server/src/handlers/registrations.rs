//! Registration handlers

use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::services::BulkAction;
use crate::AppState;
use arena_core::{
    BulkRequest, BulkResult, FlagUpdate, NewRegistration, Registration,
    RegistrationDetailsUpdate, RegistrationFilter, StatusUpdate, VerifyUpdate,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

/// Public submission
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewRegistration>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Registration>)> {
    let Json(req) = payload?;
    let registration = state.registration_service.submit(&req).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

pub async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
    query: Result<Query<RegistrationFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<Registration>>> {
    let Query(filter) = query?;
    Ok(Json(state.registration_service.list(&filter).await?))
}

pub async fn get(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Registration>> {
    Ok(Json(state.registration_service.get(&id).await?))
}

pub async fn update_status(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> ApiResult<Json<Registration>> {
    let Json(req) = payload?;
    let registration = state
        .registration_service
        .update_status(&id, req.status, &admin.username)
        .await?;
    Ok(Json(registration))
}

pub async fn update_details(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RegistrationDetailsUpdate>, JsonRejection>,
) -> ApiResult<Json<Registration>> {
    let Json(req) = payload?;
    let registration = state
        .registration_service
        .update_details(&id, &req, &admin.username)
        .await?;
    Ok(Json(registration))
}

pub async fn flag(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FlagUpdate>, JsonRejection>,
) -> ApiResult<Json<Registration>> {
    let Json(req) = payload?;
    let registration = state
        .registration_service
        .set_flag(&id, req.flagged, req.reason.as_deref(), &admin.username)
        .await?;
    Ok(Json(registration))
}

pub async fn verify(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<VerifyUpdate>, JsonRejection>,
) -> ApiResult<Json<Registration>> {
    let Json(req) = payload?;
    let registration = state
        .registration_service
        .set_payment_verified(&id, req.verified, &admin.username)
        .await?;
    Ok(Json(registration))
}

pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .registration_service
        .delete(&id, &admin.username)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn bulk(
    action: BulkAction,
    admin: AdminUser,
    state: AppState,
    payload: Result<Json<BulkRequest>, JsonRejection>,
) -> ApiResult<Json<BulkResult>> {
    let Json(req) = payload?;
    let result = state
        .registration_service
        .bulk(action, &req.ids, &admin.username)
        .await?;
    Ok(Json(result))
}

pub async fn bulk_approve(
    admin: AdminUser,
    State(state): State<AppState>,
    payload: Result<Json<BulkRequest>, JsonRejection>,
) -> ApiResult<Json<BulkResult>> {
    bulk(BulkAction::Approve, admin, state, payload).await
}

pub async fn bulk_reject(
    admin: AdminUser,
    State(state): State<AppState>,
    payload: Result<Json<BulkRequest>, JsonRejection>,
) -> ApiResult<Json<BulkResult>> {
    bulk(BulkAction::Reject, admin, state, payload).await
}

pub async fn bulk_delete(
    admin: AdminUser,
    State(state): State<AppState>,
    payload: Result<Json<BulkRequest>, JsonRejection>,
) -> ApiResult<Json<BulkResult>> {
    bulk(BulkAction::Delete, admin, state, payload).await
}
