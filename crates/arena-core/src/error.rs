//! Error types for the registration platform

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArenaError>;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Tournament is full")]
    TournamentFull,

    #[error("Registrations are closed for this tournament")]
    RegistrationClosed,

    #[error("{0}")]
    Authentication(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ArenaError {
    pub fn validation(message: impl Into<String>) -> Self {
        ArenaError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ArenaError::NotFound(message.into())
    }

    pub fn registration_not_found() -> Self {
        ArenaError::NotFound("Registration not found".to_string())
    }

    pub fn tournament_not_found() -> Self {
        ArenaError::NotFound("Tournament not found".to_string())
    }

    /// Errors the caller caused, as opposed to server faults
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ArenaError::Database(_) | ArenaError::Internal(_))
    }
}

impl From<serde_json::Error> for ArenaError {
    fn from(e: serde_json::Error) -> Self {
        ArenaError::Internal(format!("Serialization error: {}", e))
    }
}

impl From<arena_types::ParseEnumError> for ArenaError {
    fn from(e: arena_types::ParseEnumError) -> Self {
        ArenaError::Validation(e.to_string())
    }
}
