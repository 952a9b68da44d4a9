//! Audit trail and dashboard types

use crate::{RegistrationStatus, Tournament};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Admin action recorded in the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Approve,
    Reject,
    Pending,
    Delete,
    Edit,
    Flag,
    Unflag,
    Verify,
    Reset,
    UpdateQr,
    UpdateSettings,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Approve => "approve",
            ActivityAction::Reject => "reject",
            ActivityAction::Pending => "pending",
            ActivityAction::Delete => "delete",
            ActivityAction::Edit => "edit",
            ActivityAction::Flag => "flag",
            ActivityAction::Unflag => "unflag",
            ActivityAction::Verify => "verify",
            ActivityAction::Reset => "reset",
            ActivityAction::UpdateQr => "update_qr",
            ActivityAction::UpdateSettings => "update_settings",
        }
    }
}

impl From<RegistrationStatus> for ActivityAction {
    fn from(status: RegistrationStatus) -> Self {
        match status {
            RegistrationStatus::Pending => ActivityAction::Pending,
            RegistrationStatus::Approved => ActivityAction::Approve,
            RegistrationStatus::Rejected => ActivityAction::Reject,
        }
    }
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityAction {
    type Err = crate::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "approve" => ActivityAction::Approve,
            "reject" => ActivityAction::Reject,
            "pending" => ActivityAction::Pending,
            "delete" => ActivityAction::Delete,
            "edit" => ActivityAction::Edit,
            "flag" => ActivityAction::Flag,
            "unflag" => ActivityAction::Unflag,
            "verify" => ActivityAction::Verify,
            "reset" => ActivityAction::Reset,
            "update_qr" => ActivityAction::UpdateQr,
            "update_settings" => ActivityAction::UpdateSettings,
            _ => return Err(crate::ParseEnumError::new("activity action", s)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Registration,
    Tournament,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Registration => "registration",
            TargetType::Tournament => "tournament",
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = crate::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(TargetType::Registration),
            "tournament" => Ok(TargetType::Tournament),
            _ => Err(crate::ParseEnumError::new("target type", s)),
        }
    }
}

/// One audit entry, written once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    pub action: ActivityAction,
    pub target_type: TargetType,
    pub target_id: String,
    pub admin_username: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    pub fn new(
        action: ActivityAction,
        target_type: TargetType,
        target_id: impl Into<String>,
        admin_username: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            action,
            target_type,
            target_id: target_id.into(),
            admin_username: admin_username.into(),
            details,
            created_at: Utc::now(),
        }
    }
}

/// Registration counts for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationCounts {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub flagged: i64,
    pub payment_verified: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(flatten)]
    pub registrations: RegistrationCounts,
    pub tournaments: Vec<Tournament>,
}
