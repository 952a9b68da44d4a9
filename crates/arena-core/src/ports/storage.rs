//! Storage traits for persistence

use crate::catalog::TournamentSeed;
use crate::Result;
use arena_types::{
    ActivityLog, AdminInfo, Registration, RegistrationCounts, RegistrationFilter,
    RegistrationStatus, Tournament, TournamentKey, TournamentSettingsUpdate, ValidRegistration,
};
use async_trait::async_trait;

/// Tournament store
///
/// Implementations own the slot counter: every method that adds, removes or
/// re-statuses registrations keeps `registered_count` in step, and
/// `list_tournaments` repairs any drift it finds.
#[async_trait]
pub trait TournamentStore: Send + Sync {
    /// Insert catalog entries that do not exist yet. Returns how many were added.
    async fn seed_tournaments(&self, seeds: &[TournamentSeed]) -> Result<usize>;
    /// All tournaments, with counts reconciled against registration rows.
    async fn list_tournaments(&self) -> Result<Vec<Tournament>>;
    async fn get_tournament(&self, key: TournamentKey) -> Result<Option<Tournament>>;
    /// Delete every registration of a tournament and zero its count.
    async fn reset_tournament(&self, key: TournamentKey) -> Result<u64>;
    async fn update_qr_code(&self, key: TournamentKey, qr_code_url: Option<&str>) -> Result<Tournament>;
    async fn update_settings(
        &self,
        key: TournamentKey,
        settings: &TournamentSettingsUpdate,
    ) -> Result<Tournament>;
}

/// Registration store
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Take a slot and insert the registration, failing when the tournament is full.
    async fn create_registration(&self, registration: &ValidRegistration) -> Result<Registration>;
    async fn get_registration(&self, id: &str) -> Result<Option<Registration>>;
    async fn list_registrations(&self, filter: &RegistrationFilter) -> Result<Vec<Registration>>;
    async fn update_registration_status(
        &self,
        id: &str,
        status: RegistrationStatus,
    ) -> Result<Registration>;
    async fn update_registration_details(
        &self,
        id: &str,
        details: &ValidRegistration,
        admin_notes: Option<&str>,
    ) -> Result<Registration>;
    async fn set_registration_flag(
        &self,
        id: &str,
        flagged: bool,
        reason: Option<&str>,
    ) -> Result<Registration>;
    async fn set_payment_verified(&self, id: &str, verified: bool) -> Result<Registration>;
    /// Remove a registration, releasing its slot. Returns the removed row.
    async fn delete_registration(&self, id: &str) -> Result<Registration>;
    async fn registration_counts(&self) -> Result<RegistrationCounts>;
}

/// Admin account store
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Create the admin account unless one exists. Returns true when created.
    async fn ensure_admin(&self, username: &str, password_hash: &str) -> Result<bool>;
    /// Admin info and password hash by username
    async fn get_admin_credentials(&self, username: &str) -> Result<Option<(AdminInfo, String)>>;
    async fn get_admin(&self, id: &str) -> Result<Option<AdminInfo>>;
    async fn get_admin_password_hash(&self, id: &str) -> Result<Option<String>>;
    async fn update_admin_password(&self, id: &str, password_hash: &str) -> Result<()>;
    async fn record_admin_login(&self, id: &str) -> Result<()>;
}

/// Append-only activity log
#[async_trait]
pub trait ActivityLogStore: Send + Sync {
    async fn append_activity(&self, entry: &ActivityLog) -> Result<()>;
    /// Newest first
    async fn list_activity(&self, limit: i64) -> Result<Vec<ActivityLog>>;
}
