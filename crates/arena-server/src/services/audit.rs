//! Activity log recording

use crate::storage::Database;
use arena_core::ports::ActivityLogStore;
use arena_core::{ActivityAction, ActivityLog, Result, TargetType};
use std::sync::Arc;
use tracing::error;

pub const DEFAULT_ACTIVITY_LIMIT: i64 = 50;
pub const MAX_ACTIVITY_LIMIT: i64 = 500;

pub struct AuditTrail {
    db: Arc<Database>,
}

impl AuditTrail {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Append an entry. The admin action it describes has already been
    /// committed, so a failed write is logged rather than returned.
    pub async fn record(
        &self,
        admin: &str,
        action: ActivityAction,
        target_type: TargetType,
        target_id: &str,
        details: Option<String>,
    ) {
        let entry = ActivityLog::new(action, target_type, target_id, admin, details);
        if let Err(e) = self.db.append_activity(&entry).await {
            error!(
                "Failed to record {} on {} {}: {}",
                action, target_type, target_id, e
            );
        }
    }

    pub async fn recent(&self, limit: Option<i64>) -> Result<Vec<ActivityLog>> {
        let limit = limit
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .clamp(1, MAX_ACTIVITY_LIMIT);
        self.db.list_activity(limit).await
    }
}
