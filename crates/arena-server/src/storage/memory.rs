//! In-memory set of revoked tokens using DashMap

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Token ids invalidated by logout, kept until the token would have expired
/// anyway
pub struct RevokedTokens {
    entries: Arc<DashMap<String, Instant>>,
}

impl RevokedTokens {
    pub fn new() -> Self {
        let revoked = Self {
            entries: Arc::new(DashMap::new()),
        };

        // Start cleanup task
        revoked.start_cleanup_task();

        revoked
    }

    /// Revoke `token_id` for `ttl`
    pub fn revoke(&self, token_id: String, ttl: Duration) {
        self.entries.insert(token_id, Instant::now() + ttl);
    }

    pub fn is_revoked(&self, token_id: &str) -> bool {
        let expired = match self.entries.get(token_id) {
            Some(expires_at) => Instant::now() > *expires_at,
            None => return false,
        };
        if expired {
            self.entries.remove(token_id);
        }
        !expired
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn start_cleanup_task(&self) {
        let entries = Arc::downgrade(&self.entries);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                interval.tick().await;

                let Some(entries) = entries.upgrade() else {
                    break;
                };
                let now = Instant::now();
                entries.retain(|_, expires_at| *expires_at > now);
            }
        });
    }
}

impl Default for RevokedTokens {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_revoke() {
        let revoked = RevokedTokens::new();

        revoked.revoke("jti-1".to_string(), Duration::from_secs(60));
        assert!(revoked.is_revoked("jti-1"));
        assert!(!revoked.is_revoked("jti-2"));
        assert_eq!(revoked.len(), 1);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let revoked = RevokedTokens::new();

        revoked.revoke("jti-1".to_string(), Duration::from_millis(10));
        assert!(revoked.is_revoked("jti-1"));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!revoked.is_revoked("jti-1"));
        assert!(revoked.is_empty());
    }
}
