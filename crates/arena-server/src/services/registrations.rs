//! Registration service

use crate::services::AuditTrail;
use crate::storage::Database;
use arena_core::ports::RegistrationStore;
use arena_core::{
    validate_bulk_ids, validate_registration, ActivityAction, ArenaError, BulkResult,
    NewRegistration, Registration, RegistrationDetailsUpdate, RegistrationFilter,
    RegistrationStatus, Result, TargetType,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Admin actions available in bulk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Approve,
    Reject,
    Delete,
}

impl std::fmt::Display for BulkAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BulkAction::Approve => write!(f, "approve"),
            BulkAction::Reject => write!(f, "reject"),
            BulkAction::Delete => write!(f, "delete"),
        }
    }
}

pub struct RegistrationService {
    db: Arc<Database>,
    audit: Arc<AuditTrail>,
}

impl RegistrationService {
    pub fn new(db: Arc<Database>, audit: Arc<AuditTrail>) -> Self {
        Self { db, audit }
    }

    /// Public submission: validate, then take a slot and store
    pub async fn submit(&self, input: &NewRegistration) -> Result<Registration> {
        let valid = validate_registration(input)?;
        let registration = self.db.create_registration(&valid).await?;

        info!(
            "Registration {} created for {} ({})",
            registration.id,
            valid.key,
            registration.team_name.as_deref().unwrap_or(&registration.player_name)
        );
        Ok(registration)
    }

    pub async fn list(&self, filter: &RegistrationFilter) -> Result<Vec<Registration>> {
        self.db.list_registrations(filter).await
    }

    pub async fn get(&self, id: &str) -> Result<Registration> {
        self.db
            .get_registration(id)
            .await?
            .ok_or_else(ArenaError::registration_not_found)
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: RegistrationStatus,
        admin: &str,
    ) -> Result<Registration> {
        let registration = self.db.update_registration_status(id, status).await?;
        info!("Registration {} marked {} by {}", id, status, admin);

        self.audit
            .record(
                admin,
                ActivityAction::from(status),
                TargetType::Registration,
                id,
                None,
            )
            .await;
        Ok(registration)
    }

    /// Admin edit; the merged record must pass the same rules as a submission
    pub async fn update_details(
        &self,
        id: &str,
        update: &RegistrationDetailsUpdate,
        admin: &str,
    ) -> Result<Registration> {
        let current = self.get(id).await?;
        let valid = validate_registration(&update.merge_into(&current))?;
        let registration = self
            .db
            .update_registration_details(id, &valid, update.admin_notes.as_deref())
            .await?;
        info!("Registration {} edited by {}", id, admin);

        self.audit
            .record(
                admin,
                ActivityAction::Edit,
                TargetType::Registration,
                id,
                Some(changed_fields(update)),
            )
            .await;
        Ok(registration)
    }

    pub async fn set_flag(
        &self,
        id: &str,
        flagged: bool,
        reason: Option<&str>,
        admin: &str,
    ) -> Result<Registration> {
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        let registration = self.db.set_registration_flag(id, flagged, reason).await?;

        let action = if flagged {
            ActivityAction::Flag
        } else {
            ActivityAction::Unflag
        };
        self.audit
            .record(
                admin,
                action,
                TargetType::Registration,
                id,
                reason.map(str::to_string),
            )
            .await;
        Ok(registration)
    }

    pub async fn set_payment_verified(
        &self,
        id: &str,
        verified: bool,
        admin: &str,
    ) -> Result<Registration> {
        let registration = self.db.set_payment_verified(id, verified).await?;

        self.audit
            .record(
                admin,
                ActivityAction::Verify,
                TargetType::Registration,
                id,
                Some(format!("verified={}", verified)),
            )
            .await;
        Ok(registration)
    }

    pub async fn delete(&self, id: &str, admin: &str) -> Result<()> {
        let removed = self.db.delete_registration(id).await?;
        info!(
            "Registration {} ({}) deleted by {}",
            id,
            removed.tournament_key(),
            admin
        );

        self.audit
            .record(
                admin,
                ActivityAction::Delete,
                TargetType::Registration,
                id,
                Some(format!("{} {}", removed.tournament_key(), removed.player_name)),
            )
            .await;
        Ok(())
    }

    /// Apply `action` to each id independently. Per-item failures are
    /// counted and never undo earlier items.
    pub async fn bulk(&self, action: BulkAction, ids: &[String], admin: &str) -> Result<BulkResult> {
        validate_bulk_ids(ids)?;

        let mut result = BulkResult::new(ids.len());
        for id in ids {
            let outcome = match action {
                BulkAction::Approve => self
                    .update_status(id, RegistrationStatus::Approved, admin)
                    .await
                    .map(|_| ()),
                BulkAction::Reject => self
                    .update_status(id, RegistrationStatus::Rejected, admin)
                    .await
                    .map(|_| ()),
                BulkAction::Delete => self.delete(id, admin).await,
            };

            match outcome {
                Ok(()) => result.processed += 1,
                Err(e) => {
                    result.failed += 1;
                    if e.is_client_error() {
                        warn!("Bulk {} skipped {}: {}", action, id, e);
                    } else {
                        error!("Bulk {} failed for {}: {}", action, id, e);
                    }
                }
            }
        }

        info!(
            "Bulk {} by {}: {} processed, {} failed",
            action, admin, result.processed, result.failed
        );
        Ok(result)
    }
}

fn changed_fields(update: &RegistrationDetailsUpdate) -> String {
    let fields = [
        ("teamName", update.team_name.is_some()),
        ("playerName", update.player_name.is_some()),
        ("gameId", update.game_id.is_some()),
        ("phone", update.phone.is_some()),
        ("email", update.email.is_some()),
        ("teammates", update.teammates.is_some()),
        ("transactionId", update.transaction_id.is_some()),
        ("paymentScreenshotUrl", update.payment_screenshot_url.is_some()),
        ("adminNotes", update.admin_notes.is_some()),
    ];
    let changed: Vec<&str> = fields
        .iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| *name)
        .collect();
    format!("changed: {}", changed.join(", "))
}
