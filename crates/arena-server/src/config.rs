//! Server configuration
//!
//! Built-in defaults overridden by environment variables (`BIND_ADDRESS`,
//! `DATABASE_PATH`, `JWT_SECRET`, ...).

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
const DEFAULT_DATABASE_PATH: &str = "./data/arena.db";
const DEFAULT_JWT_SECRET: &str = "change-me-in-production";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_ENVIRONMENT: &str = "production";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_path: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub admin_username: String,
    pub admin_password: String,
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        info!("Loading configuration from environment...");

        let defaults = Self::default();
        let config: ServerConfig = config::Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("database_path", defaults.database_path)?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("token_ttl_hours", defaults.token_ttl_hours)?
            .set_default("admin_username", defaults.admin_username)?
            .set_default("admin_password", defaults.admin_password)?
            .set_default("environment", defaults.environment)?
            .add_source(config::Environment::default())
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Invalid configuration")?;

        if config.token_ttl_hours <= 0 {
            anyhow::bail!("TOKEN_TTL_HOURS must be positive");
        }
        if config.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("JWT_SECRET not set, using default (insecure for production)");
        }
        if config.admin_password == DEFAULT_ADMIN_PASSWORD {
            warn!("ADMIN_PASSWORD not set, the seeded admin uses the default password");
        }

        Ok(config)
    }

    /// Development builds return error details in 500 responses
    pub fn expose_internal_errors(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }
}
