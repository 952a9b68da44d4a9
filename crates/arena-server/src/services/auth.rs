//! Admin authentication service

use crate::storage::{Database, RevokedTokens};
use arena_core::ports::AdminStore;
use arena_core::{AdminInfo, ArenaError, LoginResponse, Result};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

const MIN_PASSWORD_LEN: usize = 8;

pub struct AuthService {
    db: Arc<Database>,
    revoked: Arc<RevokedTokens>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(
        db: Arc<Database>,
        revoked: Arc<RevokedTokens>,
        jwt_secret: String,
        token_ttl: Duration,
    ) -> Self {
        Self {
            db,
            revoked,
            jwt_secret,
            token_ttl,
        }
    }

    /// Create the admin account on first start
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<()> {
        let password_hash = hash_password(password)?;
        if self.db.ensure_admin(username, &password_hash).await? {
            info!("Seeded admin account '{}'", username);
        }
        Ok(())
    }

    /// Check credentials and issue a token. Failed attempts are not counted.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let admin = self.db.get_admin_credentials(username).await?;

        if let Some((admin, password_hash)) = admin {
            if verify_password(password, &password_hash)? {
                self.db.record_admin_login(&admin.id).await?;
                let token = self.issue_token(&admin)?;
                return Ok(LoginResponse {
                    token,
                    expires_in: self.token_ttl.num_seconds(),
                    admin: AdminInfo {
                        last_login_at: Some(Utc::now()),
                        ..admin
                    },
                });
            }
        }

        Err(ArenaError::Authentication(
            "Invalid username or password".to_string(),
        ))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                ArenaError::Authentication("Token has expired".to_string())
            }
            _ => ArenaError::Authentication("Invalid token".to_string()),
        })?;

        if self.revoked.is_revoked(&token_data.claims.jti) {
            return Err(ArenaError::Authentication(
                "Token has been revoked".to_string(),
            ));
        }

        Ok(token_data.claims)
    }

    /// Invalidate a token until its natural expiry
    pub fn logout(&self, claims: &Claims) {
        let remaining = claims.exp - Utc::now().timestamp();
        if remaining > 0 {
            self.revoked.revoke(
                claims.jti.clone(),
                std::time::Duration::from_secs(remaining as u64),
            );
        }
        info!("Admin '{}' logged out", claims.username);
    }

    pub async fn current_admin(&self, admin_id: &str) -> Result<AdminInfo> {
        self.db
            .get_admin(admin_id)
            .await?
            .ok_or_else(|| ArenaError::Authentication("Admin not found".to_string()))
    }

    pub async fn change_password(
        &self,
        admin_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let password_hash = self
            .db
            .get_admin_password_hash(admin_id)
            .await?
            .ok_or_else(|| ArenaError::Authentication("Admin not found".to_string()))?;

        if !verify_password(current_password, &password_hash)? {
            warn!("Password change rejected for admin {}", admin_id);
            return Err(ArenaError::Authentication(
                "Current password is incorrect".to_string(),
            ));
        }
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ArenaError::validation(format!(
                "New password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let new_hash = hash_password(new_password)?;
        self.db.update_admin_password(admin_id, &new_hash).await?;
        info!("Admin {} changed password", admin_id);
        Ok(())
    }

    fn issue_token(&self, admin: &AdminInfo) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin.id.clone(),
            username: admin.username.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
            exp: (now + self.token_ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| ArenaError::Internal(format!("Failed to sign token: {}", e)))
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ArenaError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| ArenaError::Internal(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // admin id
    pub username: String,
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service(ttl: Duration) -> AuthService {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let service = AuthService::new(
            db,
            Arc::new(RevokedTokens::new()),
            "test-secret".to_string(),
            ttl,
        );
        service.ensure_admin("admin", "s3cret-pass").await.unwrap();
        service
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("hunter22").unwrap();
        let second = hash_password("hunter22").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("hunter22", &first).unwrap());
        assert!(!verify_password("hunter23", &first).unwrap());
    }

    #[tokio::test]
    async fn test_login_issues_valid_token() {
        let auth = service(Duration::hours(24)).await;
        let response = auth.login("admin", "s3cret-pass").await.unwrap();
        assert_eq!(response.expires_in, 24 * 3600);
        assert_eq!(response.admin.username, "admin");

        let claims = auth.validate_token(&response.token).unwrap();
        assert_eq!(claims.sub, response.admin.id);
    }

    #[tokio::test]
    async fn test_repeated_failures_do_not_lock() {
        let auth = service(Duration::hours(1)).await;
        for _ in 0..3 {
            assert!(matches!(
                auth.login("admin", "wrong").await,
                Err(ArenaError::Authentication(_))
            ));
        }
        assert!(auth.login("admin", "s3cret-pass").await.is_ok());
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let auth = service(Duration::hours(-2)).await;
        let response = auth.login("admin", "s3cret-pass").await.unwrap();
        let err = auth.validate_token(&response.token).unwrap_err();
        assert_eq!(err.to_string(), "Token has expired");
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let auth = service(Duration::hours(1)).await;
        let response = auth.login("admin", "s3cret-pass").await.unwrap();
        let claims = auth.validate_token(&response.token).unwrap();

        auth.logout(&claims);
        assert!(auth.validate_token(&response.token).is_err());
    }

    #[tokio::test]
    async fn test_change_password() {
        let auth = service(Duration::hours(1)).await;
        let admin = auth.login("admin", "s3cret-pass").await.unwrap().admin;

        assert!(matches!(
            auth.change_password(&admin.id, "wrong", "new-password").await,
            Err(ArenaError::Authentication(_))
        ));
        assert!(matches!(
            auth.change_password(&admin.id, "s3cret-pass", "short").await,
            Err(ArenaError::Validation(_))
        ));

        auth.change_password(&admin.id, "s3cret-pass", "new-password")
            .await
            .unwrap();
        assert!(auth.login("admin", "s3cret-pass").await.is_err());
        assert!(auth.login("admin", "new-password").await.is_ok());
    }
}
