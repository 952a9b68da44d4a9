//! Arena Types - Pure type definitions shared by the core and server crates
//!
//! This crate contains only plain data types with no async runtime or database
//! dependencies.

pub mod activity;
pub mod admin;
pub mod registration;
pub mod tournament;

pub use activity::*;
pub use admin::*;
pub use registration::*;
pub use tournament::*;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Bgmi,
    FreeFire,
}

impl GameType {
    pub const ALL: [GameType; 2] = [GameType::Bgmi, GameType::FreeFire];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Bgmi => "bgmi",
            GameType::FreeFire => "freefire",
        }
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bgmi" => Ok(GameType::Bgmi),
            "freefire" | "free_fire" | "free-fire" => Ok(GameType::FreeFire),
            _ => Err(ParseEnumError::new("game type", s)),
        }
    }
}

/// Tournament formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentType {
    Solo,
    Duo,
    Squad,
}

impl TournamentType {
    pub const ALL: [TournamentType; 3] = [
        TournamentType::Solo,
        TournamentType::Duo,
        TournamentType::Squad,
    ];

    /// Number of players in one registration, captain included
    pub fn team_size(&self) -> usize {
        match self {
            TournamentType::Solo => 1,
            TournamentType::Duo => 2,
            TournamentType::Squad => 4,
        }
    }

    pub fn requires_team_name(&self) -> bool {
        !matches!(self, TournamentType::Solo)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentType::Solo => "solo",
            TournamentType::Duo => "duo",
            TournamentType::Squad => "squad",
        }
    }
}

impl std::fmt::Display for TournamentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solo" => Ok(TournamentType::Solo),
            "duo" => Ok(TournamentType::Duo),
            "squad" => Ok(TournamentType::Squad),
            _ => Err(ParseEnumError::new("tournament type", s)),
        }
    }
}

/// Natural key of a tournament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentKey {
    pub game_type: GameType,
    pub tournament_type: TournamentType,
}

impl TournamentKey {
    pub fn new(game_type: GameType, tournament_type: TournamentType) -> Self {
        Self {
            game_type,
            tournament_type,
        }
    }

    /// All six tournament variants
    pub fn all() -> impl Iterator<Item = TournamentKey> {
        GameType::ALL.into_iter().flat_map(|game_type| {
            TournamentType::ALL
                .into_iter()
                .map(move |tournament_type| TournamentKey::new(game_type, tournament_type))
        })
    }
}

impl std::fmt::Display for TournamentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.game_type, self.tournament_type)
    }
}

/// Returned when a string does not name a known enum variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_type_parsing() {
        assert_eq!("bgmi".parse::<GameType>().unwrap(), GameType::Bgmi);
        assert_eq!("FreeFire".parse::<GameType>().unwrap(), GameType::FreeFire);
        assert_eq!("free-fire".parse::<GameType>().unwrap(), GameType::FreeFire);
        assert!("pubg".parse::<GameType>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&GameType::FreeFire).unwrap();
        assert_eq!(json, "\"freefire\"");
        let json = serde_json::to_string(&TournamentType::Squad).unwrap();
        assert_eq!(json, "\"squad\"");
    }

    #[test]
    fn test_all_keys() {
        let keys: Vec<_> = TournamentKey::all().collect();
        assert_eq!(keys.len(), 6);
        assert_eq!(keys[0].to_string(), "bgmi-solo");
        assert_eq!(keys[5].to_string(), "freefire-squad");
    }

    #[test]
    fn test_team_size() {
        assert_eq!(TournamentType::Solo.team_size(), 1);
        assert_eq!(TournamentType::Duo.team_size(), 2);
        assert_eq!(TournamentType::Squad.team_size(), 4);
        assert!(!TournamentType::Solo.requires_team_name());
        assert!(TournamentType::Squad.requires_team_name());
    }
}
