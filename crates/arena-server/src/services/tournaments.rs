//! Tournament service

use crate::services::AuditTrail;
use crate::storage::Database;
use arena_core::ports::{RegistrationStore, TournamentStore};
use arena_core::{
    ActivityAction, ArenaError, DashboardStats, ResetResult, Result, TargetType, Tournament,
    TournamentKey, TournamentSettingsUpdate, TOURNAMENT_CATALOG,
};
use std::sync::Arc;
use tracing::info;

const QR_CODE_URL_MAX: usize = 2048;

pub struct TournamentService {
    db: Arc<Database>,
    audit: Arc<AuditTrail>,
}

impl TournamentService {
    pub fn new(db: Arc<Database>, audit: Arc<AuditTrail>) -> Self {
        Self { db, audit }
    }

    /// Insert any catalog tournaments missing from the database
    pub async fn seed(&self) -> Result<()> {
        let added = self.db.seed_tournaments(&TOURNAMENT_CATALOG).await?;
        if added > 0 {
            info!("Seeded {} tournaments", added);
        }
        Ok(())
    }

    /// Every tournament with reconciled counts
    pub async fn list(&self) -> Result<Vec<Tournament>> {
        self.db.list_tournaments().await
    }

    pub async fn get(&self, key: TournamentKey) -> Result<Tournament> {
        self.db
            .get_tournament(key)
            .await?
            .ok_or_else(ArenaError::tournament_not_found)
    }

    pub async fn reset(&self, key: TournamentKey, admin: &str) -> Result<ResetResult> {
        let deleted = self.db.reset_tournament(key).await?;
        let tournament = self.get(key).await?;
        info!("Tournament {} reset by {}: {} registrations removed", key, admin, deleted);

        self.audit
            .record(
                admin,
                ActivityAction::Reset,
                TargetType::Tournament,
                &tournament.id,
                Some(format!("{}: deleted {}", key, deleted)),
            )
            .await;
        Ok(ResetResult {
            deleted,
            tournament,
        })
    }

    pub async fn update_qr_code(
        &self,
        key: TournamentKey,
        qr_code_url: Option<&str>,
        admin: &str,
    ) -> Result<Tournament> {
        let qr_code_url = qr_code_url.map(str::trim).filter(|u| !u.is_empty());
        if qr_code_url.is_some_and(|u| u.len() > QR_CODE_URL_MAX) {
            return Err(ArenaError::validation("qrCodeUrl is too long"));
        }

        let tournament = self.db.update_qr_code(key, qr_code_url).await?;
        self.audit
            .record(
                admin,
                ActivityAction::UpdateQr,
                TargetType::Tournament,
                &tournament.id,
                Some(key.to_string()),
            )
            .await;
        Ok(tournament)
    }

    pub async fn update_settings(
        &self,
        key: TournamentKey,
        settings: &TournamentSettingsUpdate,
        admin: &str,
    ) -> Result<Tournament> {
        if settings.max_slots.is_none() && settings.is_active.is_none() {
            return Err(ArenaError::validation(
                "Provide maxSlots and/or isActive",
            ));
        }
        if settings.max_slots.is_some_and(|slots| slots < 1) {
            return Err(ArenaError::validation("maxSlots must be at least 1"));
        }

        let tournament = self.db.update_settings(key, settings).await?;
        info!(
            "Tournament {} settings updated by {}: max_slots={}, free={}, active={}",
            key,
            admin,
            tournament.max_slots,
            tournament.available_slots(),
            tournament.is_active
        );

        self.audit
            .record(
                admin,
                ActivityAction::UpdateSettings,
                TargetType::Tournament,
                &tournament.id,
                Some(format!(
                    "{}: maxSlots={}, isActive={}",
                    key, tournament.max_slots, tournament.is_active
                )),
            )
            .await;
        Ok(tournament)
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        let registrations = self.db.registration_counts().await?;
        let tournaments = self.list().await?;
        Ok(DashboardStats {
            registrations,
            tournaments,
        })
    }
}
