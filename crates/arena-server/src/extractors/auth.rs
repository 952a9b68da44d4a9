//! Auth extractor for admin routes

use crate::services::auth::Claims;
use crate::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authenticated admin, extracted from a `Bearer` token
#[derive(Clone, Debug)]
pub struct AdminUser {
    pub admin_id: String,
    pub username: String,
    pub claims: Claims,
}

/// Auth error response
pub struct AuthError {
    pub status: StatusCode,
    pub message: String,
}

impl AuthError {
    fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "code": "unauthorized"
        }));
        (self.status, body).into_response()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AuthError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::unauthorized("Invalid Authorization format"))?;

        let claims = state
            .auth_service
            .validate_token(token)
            .map_err(|e| AuthError::unauthorized(e.to_string()))?;

        Ok(AdminUser {
            admin_id: claims.sub.clone(),
            username: claims.username.clone(),
            claims,
        })
    }
}
