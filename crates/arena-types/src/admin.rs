//! Admin account types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The privileged account, without its credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminInfo {
    pub id: String,
    pub username: String,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLogin {
    pub username: String,
    pub password: String,
}

/// Issued bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub admin: AdminInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
}
