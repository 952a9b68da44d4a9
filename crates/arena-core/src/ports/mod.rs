//! Port traits (interfaces) implemented by the storage layer

pub mod storage;

pub use storage::{ActivityLogStore, AdminStore, RegistrationStore, TournamentStore};
