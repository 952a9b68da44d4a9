//! Tournament types

use crate::{GameType, TournamentKey, TournamentType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tournament variant with its slot counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub game_type: GameType,
    pub tournament_type: TournamentType,
    pub name: String,
    pub entry_fee: i64,
    pub prize_pool: i64,
    pub max_slots: i64,
    pub registered_count: i64,
    pub qr_code_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    pub fn key(&self) -> TournamentKey {
        TournamentKey::new(self.game_type, self.tournament_type)
    }

    pub fn is_full(&self) -> bool {
        self.registered_count >= self.max_slots
    }

    pub fn available_slots(&self) -> i64 {
        (self.max_slots - self.registered_count).max(0)
    }
}

/// Admin update of a tournament's QR code
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeUpdate {
    pub qr_code_url: Option<String>,
}

/// Admin update of capacity and open/closed state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSettingsUpdate {
    pub max_slots: Option<i64>,
    pub is_active: Option<bool>,
}

/// Result of wiping a tournament's registrations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResult {
    pub deleted: u64,
    pub tournament: Tournament,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tournament(max_slots: i64, registered_count: i64) -> Tournament {
        Tournament {
            id: "t1".to_string(),
            game_type: GameType::Bgmi,
            tournament_type: TournamentType::Solo,
            name: "BGMI Solo Showdown".to_string(),
            entry_fee: 30,
            prize_pool: 2000,
            max_slots,
            registered_count,
            qr_code_url: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_slot_helpers() {
        let open = tournament(100, 40);
        assert!(!open.is_full());
        assert_eq!(open.available_slots(), 60);

        // Capacity lowered below the current count
        let shrunk = tournament(10, 12);
        assert!(shrunk.is_full());
        assert_eq!(shrunk.available_slots(), 0);
    }
}
