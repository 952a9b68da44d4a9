//! HTTP error responses

use crate::AppState;
use arena_core::ArenaError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Full error text of a 500, carried on the response next to the generic body
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] ArenaError),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(e) => match e {
                ArenaError::Validation(_)
                | ArenaError::TournamentFull
                | ArenaError::RegistrationClosed => StatusCode::BAD_REQUEST,
                ArenaError::NotFound(_) => StatusCode::NOT_FOUND,
                ArenaError::Authentication(_) => StatusCode::UNAUTHORIZED,
                ArenaError::Database(_) | ArenaError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if !status.is_server_error() {
            return (status, Json(ErrorBody { error: self.to_string() })).into_response();
        }

        tracing::error!("Request failed: {:#}", self);
        let mut response = (
            status,
            Json(ErrorBody {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response();
        response
            .extensions_mut()
            .insert(InternalErrorDetail(format!("{:#}", self)));
        response
    }
}

/// Middleware: in development, replace the generic 500 body with the
/// underlying error text
pub async fn expose_internal_errors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !state.expose_internal_errors {
        return response;
    }

    match response.extensions().get::<InternalErrorDetail>().cloned() {
        Some(InternalErrorDetail(detail)) => {
            (response.status(), Json(ErrorBody { error: detail })).into_response()
        }
        None => response,
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
