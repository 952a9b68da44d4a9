//! Arena Registration Server
//!
//! HTTP API for tournament registrations: public submission, admin review and
//! slot accounting backed by SQLite.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod services;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use config::ServerConfig;
use services::{AuditTrail, AuthService, RegistrationService, TournamentService};
use storage::{Database, RevokedTokens};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    pub registration_service: Arc<RegistrationService>,
    pub tournament_service: Arc<TournamentService>,
    pub audit: Arc<AuditTrail>,
    /// Return error text in 500 bodies (development only)
    pub expose_internal_errors: bool,
}

impl AppState {
    /// Wire services over `db`, seed the tournament catalog and the admin account
    pub async fn initialize(config: &ServerConfig, db: Database) -> Result<Self> {
        let db = Arc::new(db);
        let revoked = Arc::new(RevokedTokens::new());
        let audit = Arc::new(AuditTrail::new(db.clone()));

        let auth_service = Arc::new(AuthService::new(
            db.clone(),
            revoked,
            config.jwt_secret.clone(),
            config.token_ttl(),
        ));
        let registration_service = Arc::new(RegistrationService::new(db.clone(), audit.clone()));
        let tournament_service = Arc::new(TournamentService::new(db.clone(), audit.clone()));

        tournament_service
            .seed()
            .await
            .context("Failed to seed tournaments")?;
        auth_service
            .ensure_admin(&config.admin_username, &config.admin_password)
            .await
            .context("Failed to seed admin account")?;
        info!("Services initialized");

        Ok(Self {
            db,
            auth_service,
            registration_service,
            tournament_service,
            audit,
            expose_internal_errors: config.expose_internal_errors(),
        })
    }
}

/// Full HTTP router with middleware layers
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error::expose_internal_errors,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        // Admin auth
        .route("/admin/login", post(handlers::auth::login))
        .route("/admin/logout", post(handlers::auth::logout))
        .route("/admin/me", get(handlers::auth::me))
        .route(
            "/admin/change-password",
            post(handlers::auth::change_password),
        )
        // Tournaments
        .route("/tournaments", get(handlers::tournaments::list))
        .route("/tournaments/reset", post(handlers::tournaments::reset))
        .route(
            "/tournaments/:game_type/:tournament_type",
            get(handlers::tournaments::get),
        )
        .route(
            "/tournaments/:game_type/:tournament_type/qr",
            patch(handlers::tournaments::update_qr),
        )
        .route(
            "/tournaments/:game_type/:tournament_type/settings",
            patch(handlers::tournaments::update_settings),
        )
        // Registrations
        .route(
            "/registrations",
            get(handlers::registrations::list).post(handlers::registrations::create),
        )
        .route(
            "/registrations/bulk/approve",
            post(handlers::registrations::bulk_approve),
        )
        .route(
            "/registrations/bulk/reject",
            post(handlers::registrations::bulk_reject),
        )
        .route(
            "/registrations/bulk/delete",
            post(handlers::registrations::bulk_delete),
        )
        .route(
            "/registrations/:id",
            get(handlers::registrations::get)
                .patch(handlers::registrations::update_status)
                .delete(handlers::registrations::delete),
        )
        .route(
            "/registrations/:id/details",
            patch(handlers::registrations::update_details),
        )
        .route("/registrations/:id/flag", post(handlers::registrations::flag))
        .route(
            "/registrations/:id/verify",
            post(handlers::registrations::verify),
        )
        // Dashboard
        .route("/activity-logs", get(handlers::dashboard::activity_logs))
        .route("/stats", get(handlers::dashboard::stats))
}
