//! Submission validation
//!
//! Runs at the HTTP boundary, so invalid payloads never reach storage. The
//! same rules apply to public submissions and to admin edits of an existing
//! registration.

use crate::error::{ArenaError, Result};
use arena_types::{
    GameType, NewRegistration, Teammate, TournamentKey, TournamentType, ValidRegistration,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Upper bound on ids accepted by one bulk action
pub const MAX_BULK_IDS: usize = 100;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const SCREENSHOT_URL_MAX: usize = 500;

static GAME_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5,20}$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9]\d{9}$").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$").unwrap());
static TRANSACTION_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{6,40}$").unwrap());

/// Validate and normalize a submission
pub fn validate_registration(input: &NewRegistration) -> Result<ValidRegistration> {
    let game_type: GameType = input.game_type.trim().parse()?;
    let tournament_type: TournamentType = input.tournament_type.trim().parse()?;

    let player_name = validate_name("playerName", &input.player_name)?;
    let game_id = validate_game_id("gameId", &input.game_id)?;
    let phone = normalize_phone(&input.phone)?;

    let team_name = if tournament_type.requires_team_name() {
        let raw = input
            .team_name
            .as_deref()
            .ok_or_else(|| ArenaError::validation("teamName is required for team tournaments"))?;
        Some(validate_name("teamName", raw)?)
    } else {
        None
    };

    let email = match non_empty(input.email.as_deref()) {
        Some(email) if EMAIL_RE.is_match(email) => Some(email.to_lowercase()),
        Some(_) => return Err(ArenaError::validation("email is not a valid address")),
        None => None,
    };

    let expected = tournament_type.team_size() - 1;
    if input.teammates.len() != expected {
        return Err(ArenaError::validation(format!(
            "{} registrations need exactly {} teammate(s), got {}",
            tournament_type,
            expected,
            input.teammates.len()
        )));
    }

    let mut teammates = Vec::with_capacity(expected);
    let mut seen_ids = HashSet::from([game_id.clone()]);
    for (i, mate) in input.teammates.iter().enumerate() {
        let name = validate_name(&format!("teammates[{}].name", i), &mate.name)?;
        let mate_id = validate_game_id(&format!("teammates[{}].gameId", i), &mate.game_id)?;
        if !seen_ids.insert(mate_id.clone()) {
            return Err(ArenaError::validation(format!(
                "Duplicate game ID {} within the team",
                mate_id
            )));
        }
        teammates.push(Teammate {
            name,
            game_id: mate_id,
        });
    }

    let transaction_id = input.transaction_id.trim();
    if !TRANSACTION_ID_RE.is_match(transaction_id) {
        return Err(ArenaError::validation(
            "transactionId must be 6-40 letters or digits",
        ));
    }

    let payment_screenshot_url = match non_empty(input.payment_screenshot_url.as_deref()) {
        Some(url) if url.len() > SCREENSHOT_URL_MAX => {
            return Err(ArenaError::validation("paymentScreenshotUrl is too long"))
        }
        other => other.map(str::to_string),
    };

    Ok(ValidRegistration {
        key: TournamentKey::new(game_type, tournament_type),
        team_name,
        player_name,
        game_id,
        phone,
        email,
        teammates,
        transaction_id: transaction_id.to_uppercase(),
        payment_screenshot_url,
    })
}

/// Reject empty or oversized bulk id lists before any work is done
pub fn validate_bulk_ids(ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        return Err(ArenaError::validation("ids must not be empty"));
    }
    if ids.len() > MAX_BULK_IDS {
        return Err(ArenaError::validation(format!(
            "At most {} ids can be processed at once",
            MAX_BULK_IDS
        )));
    }
    Ok(())
}

fn validate_name(field: &str, raw: &str) -> Result<String> {
    let name = raw.trim();
    let len = name.chars().count();
    if len < NAME_MIN || len > NAME_MAX {
        return Err(ArenaError::validation(format!(
            "{} must be between {} and {} characters",
            field, NAME_MIN, NAME_MAX
        )));
    }
    Ok(name.to_string())
}

fn validate_game_id(field: &str, raw: &str) -> Result<String> {
    let id = raw.trim();
    if !GAME_ID_RE.is_match(id) {
        return Err(ArenaError::validation(format!(
            "{} must be 5-20 digits",
            field
        )));
    }
    Ok(id.to_string())
}

fn normalize_phone(raw: &str) -> Result<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    let digits = compact.strip_prefix("+91").unwrap_or(&compact);
    if !PHONE_RE.is_match(digits) {
        return Err(ArenaError::validation(
            "phone must be a 10 digit Indian mobile number",
        ));
    }
    Ok(digits.to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solo() -> NewRegistration {
        NewRegistration {
            game_type: "bgmi".to_string(),
            tournament_type: "solo".to_string(),
            player_name: "  Riya  ".to_string(),
            game_id: "5551234567".to_string(),
            phone: "+91 98765-43210".to_string(),
            transaction_id: "utr987654321".to_string(),
            ..Default::default()
        }
    }

    fn squad() -> NewRegistration {
        NewRegistration {
            game_type: "freefire".to_string(),
            tournament_type: "squad".to_string(),
            team_name: Some("Storm".to_string()),
            teammates: (1..=3)
                .map(|i| Teammate {
                    name: format!("Mate {}", i),
                    game_id: format!("77700000{}", i),
                })
                .collect(),
            ..solo()
        }
    }

    fn message(err: ArenaError) -> String {
        match err {
            ArenaError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_solo_is_normalized() {
        let valid = validate_registration(&solo()).unwrap();
        assert_eq!(valid.key.to_string(), "bgmi-solo");
        assert_eq!(valid.player_name, "Riya");
        assert_eq!(valid.phone, "9876543210");
        assert_eq!(valid.transaction_id, "UTR987654321");
        assert!(valid.team_name.is_none());
        assert!(valid.teammates.is_empty());
    }

    #[test]
    fn test_solo_drops_team_name() {
        let input = NewRegistration {
            team_name: Some("Lone Wolves".to_string()),
            ..solo()
        };
        assert!(validate_registration(&input).unwrap().team_name.is_none());
    }

    #[test]
    fn test_valid_squad() {
        let valid = validate_registration(&squad()).unwrap();
        assert_eq!(valid.teammates.len(), 3);
        assert_eq!(valid.team_name.as_deref(), Some("Storm"));
    }

    #[test]
    fn test_team_requires_team_name() {
        let input = NewRegistration {
            team_name: None,
            ..squad()
        };
        assert!(message(validate_registration(&input).unwrap_err()).contains("teamName"));
    }

    #[test]
    fn test_teammate_count_must_match_format() {
        let mut input = squad();
        input.teammates.pop();
        assert!(message(validate_registration(&input).unwrap_err()).contains("exactly 3"));
    }

    #[test]
    fn test_duplicate_game_ids_in_team() {
        let mut input = squad();
        input.teammates[2].game_id = input.game_id.clone();
        assert!(message(validate_registration(&input).unwrap_err()).contains("Duplicate"));
    }

    #[test]
    fn test_rejects_bad_fields() {
        let cases = [
            NewRegistration {
                game_type: "pubg".to_string(),
                ..solo()
            },
            NewRegistration {
                player_name: "R".to_string(),
                ..solo()
            },
            NewRegistration {
                game_id: "12ab".to_string(),
                ..solo()
            },
            NewRegistration {
                phone: "1234567890".to_string(),
                ..solo()
            },
            NewRegistration {
                email: Some("not-an-email".to_string()),
                ..solo()
            },
            NewRegistration {
                transaction_id: "abc".to_string(),
                ..solo()
            },
        ];
        for case in cases {
            assert!(matches!(
                validate_registration(&case),
                Err(ArenaError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_blank_email_is_ignored() {
        let input = NewRegistration {
            email: Some("   ".to_string()),
            ..solo()
        };
        assert!(validate_registration(&input).unwrap().email.is_none());
    }

    #[test]
    fn test_bulk_id_limits() {
        assert!(validate_bulk_ids(&[]).is_err());
        assert!(validate_bulk_ids(&vec!["a".to_string(); MAX_BULK_IDS]).is_ok());
        assert!(validate_bulk_ids(&vec!["a".to_string(); MAX_BULK_IDS + 1]).is_err());
    }
}
