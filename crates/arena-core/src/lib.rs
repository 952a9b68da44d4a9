//! Arena Core Library
//!
//! Domain rules for the tournament registration platform: the tournament
//! catalog, submission validation, the error type and the storage ports.

// Re-export pure types from arena-types
pub use arena_types::*;

pub mod catalog;
pub mod error;
pub mod ports;
pub mod validation;

pub use catalog::{TournamentSeed, TOURNAMENT_CATALOG};
pub use error::{ArenaError, Result};
pub use validation::{validate_bulk_ids, validate_registration, MAX_BULK_IDS};
