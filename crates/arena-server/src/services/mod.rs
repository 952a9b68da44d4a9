//! Business logic services

pub mod audit;
pub mod auth;
pub mod registrations;
pub mod tournaments;

pub use audit::AuditTrail;
pub use auth::AuthService;
pub use registrations::{BulkAction, RegistrationService};
pub use tournaments::TournamentService;
