//! Registration types

use crate::{GameType, TournamentKey, TournamentType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Review state of a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    /// Whether a registration in this state occupies a tournament slot
    pub fn holds_slot(&self) -> bool {
        matches!(self, RegistrationStatus::Pending | RegistrationStatus::Approved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = crate::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(RegistrationStatus::Pending),
            "approved" => Ok(RegistrationStatus::Approved),
            "rejected" => Ok(RegistrationStatus::Rejected),
            _ => Err(crate::ParseEnumError::new("status", s)),
        }
    }
}

/// A teammate other than the captain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teammate {
    pub name: String,
    pub game_id: String,
}

/// A stored registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub game_type: GameType,
    pub tournament_type: TournamentType,
    pub team_name: Option<String>,
    pub player_name: String,
    pub game_id: String,
    pub phone: String,
    pub email: Option<String>,
    pub teammates: Vec<Teammate>,
    pub transaction_id: String,
    pub payment_screenshot_url: Option<String>,
    pub status: RegistrationStatus,
    pub is_flagged: bool,
    pub flag_reason: Option<String>,
    pub payment_verified: bool,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    pub fn tournament_key(&self) -> TournamentKey {
        TournamentKey::new(self.game_type, self.tournament_type)
    }
}

/// Public registration submission
///
/// Enum fields arrive as strings so that unknown values surface as
/// validation errors instead of JSON rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub game_type: String,
    pub tournament_type: String,
    #[serde(default)]
    pub team_name: Option<String>,
    pub player_name: String,
    pub game_id: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub teammates: Vec<Teammate>,
    pub transaction_id: String,
    #[serde(default)]
    pub payment_screenshot_url: Option<String>,
}

/// A submission that passed validation, normalized and ready to store
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRegistration {
    pub key: TournamentKey,
    pub team_name: Option<String>,
    pub player_name: String,
    pub game_id: String,
    pub phone: String,
    pub email: Option<String>,
    pub teammates: Vec<Teammate>,
    pub transaction_id: String,
    pub payment_screenshot_url: Option<String>,
}

/// Partial admin edit of registration details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDetailsUpdate {
    pub team_name: Option<String>,
    pub player_name: Option<String>,
    pub game_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub teammates: Option<Vec<Teammate>>,
    pub transaction_id: Option<String>,
    pub payment_screenshot_url: Option<String>,
    pub admin_notes: Option<String>,
}

impl RegistrationDetailsUpdate {
    /// Overlay the changed fields onto an existing registration as a submission
    pub fn merge_into(&self, current: &Registration) -> NewRegistration {
        NewRegistration {
            game_type: current.game_type.to_string(),
            tournament_type: current.tournament_type.to_string(),
            team_name: self.team_name.clone().or_else(|| current.team_name.clone()),
            player_name: self
                .player_name
                .clone()
                .unwrap_or_else(|| current.player_name.clone()),
            game_id: self.game_id.clone().unwrap_or_else(|| current.game_id.clone()),
            phone: self.phone.clone().unwrap_or_else(|| current.phone.clone()),
            email: self.email.clone().or_else(|| current.email.clone()),
            teammates: self
                .teammates
                .clone()
                .unwrap_or_else(|| current.teammates.clone()),
            transaction_id: self
                .transaction_id
                .clone()
                .unwrap_or_else(|| current.transaction_id.clone()),
            payment_screenshot_url: self
                .payment_screenshot_url
                .clone()
                .or_else(|| current.payment_screenshot_url.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: RegistrationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagUpdate {
    pub flagged: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyUpdate {
    pub verified: bool,
}

/// Query filters for the admin registration list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFilter {
    pub game_type: Option<GameType>,
    pub tournament_type: Option<TournamentType>,
    pub status: Option<RegistrationStatus>,
    pub flagged: Option<bool>,
    pub search: Option<String>,
}

/// Ids for a bulk admin action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRequest {
    pub ids: Vec<String>,
}

/// Outcome of a best-effort bulk action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BulkResult {
    pub processed: usize,
    pub failed: usize,
    pub total: usize,
}

impl BulkResult {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registration {
        let now = Utc::now();
        Registration {
            id: "r1".to_string(),
            game_type: GameType::Bgmi,
            tournament_type: TournamentType::Duo,
            team_name: Some("Night Owls".to_string()),
            player_name: "Aarav".to_string(),
            game_id: "5123456789".to_string(),
            phone: "9876543210".to_string(),
            email: None,
            teammates: vec![Teammate {
                name: "Kabir".to_string(),
                game_id: "5123456790".to_string(),
            }],
            transaction_id: "UTR123456".to_string(),
            payment_screenshot_url: None,
            status: RegistrationStatus::Pending,
            is_flagged: false,
            flag_reason: None,
            payment_verified: false,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_holds_slot() {
        assert!(RegistrationStatus::Pending.holds_slot());
        assert!(RegistrationStatus::Approved.holds_slot());
        assert!(!RegistrationStatus::Rejected.holds_slot());
    }

    #[test]
    fn test_merge_keeps_unchanged_fields() {
        let current = sample();
        let update = RegistrationDetailsUpdate {
            player_name: Some("Aarav S".to_string()),
            ..Default::default()
        };

        let merged = update.merge_into(&current);
        assert_eq!(merged.player_name, "Aarav S");
        assert_eq!(merged.team_name.as_deref(), Some("Night Owls"));
        assert_eq!(merged.teammates, current.teammates);
        assert_eq!(merged.game_type, "bgmi");
        assert_eq!(merged.tournament_type, "duo");
    }

    #[test]
    fn test_registration_json_is_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["gameType"], "bgmi");
        assert_eq!(value["transactionId"], "UTR123456");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["teammates"][0]["gameId"], "5123456790");
    }
}
