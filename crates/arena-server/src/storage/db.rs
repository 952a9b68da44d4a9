//! SQLite database layer (embedded, no external dependencies)
//!
//! Slot accounting lives here. Taking a slot is a single conditional
//! `UPDATE ... WHERE registered_count < max_slots`, so concurrent submissions
//! cannot push a tournament past capacity; releasing one is clamped at zero.
//! Full list reads recount slot-holding rows and persist any correction.
//!
//! Every write transaction opens with a write statement. A deferred SQLite
//! transaction that reads first cannot upgrade to the write lock while another
//! writer holds it and fails with `SQLITE_BUSY` instead of waiting out the busy
//! timeout.

use arena_core::catalog::TournamentSeed;
use arena_core::ports::{ActivityLogStore, AdminStore, RegistrationStore, TournamentStore};
use arena_core::{
    ActivityLog, AdminInfo, ArenaError, Registration, RegistrationCounts, RegistrationFilter,
    RegistrationStatus, Result, Teammate, Tournament, TournamentKey, TournamentSettingsUpdate,
    ValidRegistration,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::collections::HashMap;
use std::str::FromStr;

const TOURNAMENT_COLUMNS: &str = "id, game_type, tournament_type, name, entry_fee, prize_pool, \
     max_slots, registered_count, qr_code_url, is_active, created_at, updated_at";

const REGISTRATION_COLUMNS: &str = "id, game_type, tournament_type, team_name, player_name, \
     game_id, phone, email, teammates, transaction_id, payment_screenshot_url, status, \
     is_flagged, flag_reason, payment_verified, admin_notes, created_at, updated_at";

/// Maps sqlx failures onto the domain error
trait SqlxResultExt<T> {
    fn db(self) -> Result<T>;
}

impl<T> SqlxResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn db(self) -> Result<T> {
        self.map_err(|e| ArenaError::Database(e.to_string()))
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database at `database_path`. `:memory:` opens a
    /// private in-memory database.
    pub async fn new(database_path: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        if database_path == ":memory:" {
            return Self::in_memory()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to open in-memory database: {}", e));
        }

        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, running migrations...");

        let db = Self { pool };
        db.run_migrations()
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");
        Ok(db)
    }

    /// A private in-memory database on a single pinned connection
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").db()?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .db()?;

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tournaments (
                id TEXT PRIMARY KEY,
                game_type TEXT NOT NULL,
                tournament_type TEXT NOT NULL,
                name TEXT NOT NULL,
                entry_fee INTEGER NOT NULL DEFAULT 0,
                prize_pool INTEGER NOT NULL DEFAULT 0,
                max_slots INTEGER NOT NULL,
                registered_count INTEGER NOT NULL DEFAULT 0,
                qr_code_url TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (game_type, tournament_type)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .db()?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS registrations (
                id TEXT PRIMARY KEY,
                game_type TEXT NOT NULL,
                tournament_type TEXT NOT NULL,
                team_name TEXT,
                player_name TEXT NOT NULL,
                game_id TEXT NOT NULL,
                phone TEXT NOT NULL,
                email TEXT,
                teammates TEXT NOT NULL DEFAULT '[]',
                transaction_id TEXT NOT NULL,
                payment_screenshot_url TEXT,
                status TEXT NOT NULL DEFAULT 'pending',
                is_flagged INTEGER NOT NULL DEFAULT 0,
                flag_reason TEXT,
                payment_verified INTEGER NOT NULL DEFAULT 0,
                admin_notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .db()?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_registrations_tournament
            ON registrations (game_type, tournament_type, status)
            "#,
        )
        .execute(&self.pool)
        .await
        .db()?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_registrations_transaction
            ON registrations (transaction_id)
            "#,
        )
        .execute(&self.pool)
        .await
        .db()?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS admins (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                last_login_at TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .db()?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS activity_logs (
                id TEXT PRIMARY KEY,
                action TEXT NOT NULL,
                target_type TEXT NOT NULL,
                target_id TEXT NOT NULL,
                admin_username TEXT NOT NULL,
                details TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .db()?;

        Ok(())
    }

    /// Round-trip to the database for health checks
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await.db()?;
        Ok(())
    }
}

// Slot accounting, always called inside a transaction

/// Increment the count unless the tournament is full (or inactive when
/// `require_active` is set).
async fn take_slot(
    conn: &mut SqliteConnection,
    key: TournamentKey,
    require_active: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE tournaments
        SET registered_count = registered_count + 1, updated_at = ?1
        WHERE game_type = ?2 AND tournament_type = ?3
          AND registered_count < max_slots
          AND (is_active = 1 OR ?4 = 0)
        "#,
    )
    .bind(now)
    .bind(key.game_type.as_str())
    .bind(key.tournament_type.as_str())
    .bind(require_active)
    .execute(&mut *conn)
    .await
    .db()?;

    if result.rows_affected() == 1 {
        return Ok(());
    }

    // Nothing updated: work out why
    let tournament = fetch_tournament(conn, key)
        .await?
        .ok_or_else(ArenaError::tournament_not_found)?;

    if require_active && !tournament.is_active {
        Err(ArenaError::RegistrationClosed)
    } else if tournament.is_full() {
        Err(ArenaError::TournamentFull)
    } else {
        Err(ArenaError::Internal(format!(
            "Slot update on {} matched no row with {} slots free",
            key,
            tournament.available_slots()
        )))
    }
}

/// Decrement the count, never below zero
async fn release_slot(
    conn: &mut SqliteConnection,
    key: TournamentKey,
    now: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE tournaments
        SET registered_count = MAX(registered_count - 1, 0), updated_at = ?1
        WHERE game_type = ?2 AND tournament_type = ?3
        "#,
    )
    .bind(now)
    .bind(key.game_type.as_str())
    .bind(key.tournament_type.as_str())
    .execute(&mut *conn)
    .await
    .db()?;

    Ok(())
}

async fn fetch_tournament(conn: &mut SqliteConnection, key: TournamentKey) -> Result<Option<Tournament>> {
    let row: Option<TournamentRow> = sqlx::query_as(&format!(
        "SELECT {} FROM tournaments WHERE game_type = ?1 AND tournament_type = ?2",
        TOURNAMENT_COLUMNS
    ))
    .bind(key.game_type.as_str())
    .bind(key.tournament_type.as_str())
    .fetch_optional(&mut *conn)
    .await
    .db()?;

    row.map(Tournament::try_from).transpose()
}

async fn fetch_registration(conn: &mut SqliteConnection, id: &str) -> Result<Option<Registration>> {
    let row: Option<RegistrationRow> = sqlx::query_as(&format!(
        "SELECT {} FROM registrations WHERE id = ?1",
        REGISTRATION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .db()?;

    row.map(Registration::try_from).transpose()
}

/// Touch the row, then load it. Used as the opening statement of a write
/// transaction on an existing registration.
async fn claim_registration(
    conn: &mut SqliteConnection,
    id: &str,
    now: DateTime<Utc>,
) -> Result<Registration> {
    let result = sqlx::query("UPDATE registrations SET updated_at = ?1 WHERE id = ?2")
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await
        .db()?;
    if result.rows_affected() == 0 {
        return Err(ArenaError::registration_not_found());
    }

    fetch_registration(conn, id)
        .await?
        .ok_or_else(ArenaError::registration_not_found)
}

/// Reject a transaction id reused from another registration, or a game id
/// that already holds a slot in the same tournament.
async fn check_duplicates(
    conn: &mut SqliteConnection,
    registration: &ValidRegistration,
    exclude_id: Option<&str>,
) -> Result<()> {
    let reused: Option<(String,)> = sqlx::query_as(
        "SELECT id FROM registrations WHERE transaction_id = ?1 AND id != ?2 LIMIT 1",
    )
    .bind(&registration.transaction_id)
    .bind(exclude_id.unwrap_or(""))
    .fetch_optional(&mut *conn)
    .await
    .db()?;
    if reused.is_some() {
        return Err(ArenaError::validation(
            "This transaction ID has already been used",
        ));
    }

    check_game_id(conn, registration.key, &registration.game_id, exclude_id).await
}

/// A game id may hold at most one slot per tournament
async fn check_game_id(
    conn: &mut SqliteConnection,
    key: TournamentKey,
    game_id: &str,
    exclude_id: Option<&str>,
) -> Result<()> {
    let taken: Option<(String,)> = sqlx::query_as(
        r#"
        SELECT id FROM registrations
        WHERE game_type = ?1 AND tournament_type = ?2 AND game_id = ?3
          AND status IN ('pending', 'approved') AND id != ?4
        LIMIT 1
        "#,
    )
    .bind(key.game_type.as_str())
    .bind(key.tournament_type.as_str())
    .bind(game_id)
    .bind(exclude_id.unwrap_or(""))
    .fetch_optional(&mut *conn)
    .await
    .db()?;
    if taken.is_some() {
        return Err(ArenaError::validation(
            "A player with this game ID is already registered for this tournament",
        ));
    }

    Ok(())
}

#[async_trait]
impl TournamentStore for Database {
    async fn seed_tournaments(&self, seeds: &[TournamentSeed]) -> Result<usize> {
        let now = Utc::now();
        let mut inserted = 0;

        for seed in seeds {
            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO tournaments
                    (id, game_type, tournament_type, name, entry_fee, prize_pool,
                     max_slots, registered_count, is_active, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, 1, ?8, ?8)
                "#,
            )
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(seed.key.game_type.as_str())
            .bind(seed.key.tournament_type.as_str())
            .bind(seed.name)
            .bind(seed.entry_fee)
            .bind(seed.prize_pool)
            .bind(seed.max_slots)
            .bind(now)
            .execute(&self.pool)
            .await
            .db()?;

            inserted += result.rows_affected() as usize;
        }

        Ok(inserted)
    }

    async fn list_tournaments(&self) -> Result<Vec<Tournament>> {
        let rows: Vec<TournamentRow> =
            sqlx::query_as(&format!("SELECT {} FROM tournaments", TOURNAMENT_COLUMNS))
                .fetch_all(&self.pool)
                .await
                .db()?;

        let actual: HashMap<(String, String), i64> = sqlx::query_as::<_, (String, String, i64)>(
            r#"
            SELECT game_type, tournament_type, COUNT(*)
            FROM registrations
            WHERE status IN ('pending', 'approved')
            GROUP BY game_type, tournament_type
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .db()?
        .into_iter()
        .map(|(game, kind, count)| ((game, kind), count))
        .collect();

        let mut tournaments = rows
            .into_iter()
            .map(Tournament::try_from)
            .collect::<Result<Vec<_>>>()?;

        for tournament in &mut tournaments {
            let lookup = (
                tournament.game_type.to_string(),
                tournament.tournament_type.to_string(),
            );
            let count = actual.get(&lookup).copied().unwrap_or(0);
            if tournament.registered_count == count {
                continue;
            }

            tracing::warn!(
                "Reconciling {} registered_count: stored={}, actual={}",
                tournament.key(),
                tournament.registered_count,
                count
            );

            let now = Utc::now();
            sqlx::query("UPDATE tournaments SET registered_count = ?1, updated_at = ?2 WHERE id = ?3")
                .bind(count)
                .bind(now)
                .bind(&tournament.id)
                .execute(&self.pool)
                .await
                .db()?;

            tournament.registered_count = count;
            tournament.updated_at = now;
        }

        tournaments.sort_by_key(|t| t.key());
        Ok(tournaments)
    }

    async fn get_tournament(&self, key: TournamentKey) -> Result<Option<Tournament>> {
        let mut conn = self.pool.acquire().await.db()?;
        fetch_tournament(&mut conn, key).await
    }

    async fn reset_tournament(&self, key: TournamentKey) -> Result<u64> {
        let mut tx = self.pool.begin().await.db()?;

        let deleted = sqlx::query(
            "DELETE FROM registrations WHERE game_type = ?1 AND tournament_type = ?2",
        )
        .bind(key.game_type.as_str())
        .bind(key.tournament_type.as_str())
        .execute(&mut *tx)
        .await
        .db()?
        .rows_affected();

        let reset = sqlx::query(
            r#"
            UPDATE tournaments SET registered_count = 0, updated_at = ?1
            WHERE game_type = ?2 AND tournament_type = ?3
            "#,
        )
        .bind(Utc::now())
        .bind(key.game_type.as_str())
        .bind(key.tournament_type.as_str())
        .execute(&mut *tx)
        .await
        .db()?;
        if reset.rows_affected() == 0 {
            return Err(ArenaError::tournament_not_found());
        }

        tx.commit().await.db()?;
        Ok(deleted)
    }

    async fn update_qr_code(&self, key: TournamentKey, qr_code_url: Option<&str>) -> Result<Tournament> {
        let result = sqlx::query(
            r#"
            UPDATE tournaments SET qr_code_url = ?1, updated_at = ?2
            WHERE game_type = ?3 AND tournament_type = ?4
            "#,
        )
        .bind(qr_code_url)
        .bind(Utc::now())
        .bind(key.game_type.as_str())
        .bind(key.tournament_type.as_str())
        .execute(&self.pool)
        .await
        .db()?;

        if result.rows_affected() == 0 {
            return Err(ArenaError::tournament_not_found());
        }
        self.get_tournament(key)
            .await?
            .ok_or_else(ArenaError::tournament_not_found)
    }

    async fn update_settings(
        &self,
        key: TournamentKey,
        settings: &TournamentSettingsUpdate,
    ) -> Result<Tournament> {
        let result = sqlx::query(
            r#"
            UPDATE tournaments
            SET max_slots = COALESCE(?1, max_slots),
                is_active = COALESCE(?2, is_active),
                updated_at = ?3
            WHERE game_type = ?4 AND tournament_type = ?5
            "#,
        )
        .bind(settings.max_slots)
        .bind(settings.is_active)
        .bind(Utc::now())
        .bind(key.game_type.as_str())
        .bind(key.tournament_type.as_str())
        .execute(&self.pool)
        .await
        .db()?;

        if result.rows_affected() == 0 {
            return Err(ArenaError::tournament_not_found());
        }
        self.get_tournament(key)
            .await?
            .ok_or_else(ArenaError::tournament_not_found)
    }
}

#[async_trait]
impl RegistrationStore for Database {
    async fn create_registration(&self, registration: &ValidRegistration) -> Result<Registration> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.db()?;

        take_slot(&mut tx, registration.key, true, now).await?;
        check_duplicates(&mut tx, registration, None).await?;

        let created = Registration {
            id: uuid::Uuid::new_v4().to_string(),
            game_type: registration.key.game_type,
            tournament_type: registration.key.tournament_type,
            team_name: registration.team_name.clone(),
            player_name: registration.player_name.clone(),
            game_id: registration.game_id.clone(),
            phone: registration.phone.clone(),
            email: registration.email.clone(),
            teammates: registration.teammates.clone(),
            transaction_id: registration.transaction_id.clone(),
            payment_screenshot_url: registration.payment_screenshot_url.clone(),
            status: RegistrationStatus::Pending,
            is_flagged: false,
            flag_reason: None,
            payment_verified: false,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO registrations
                (id, game_type, tournament_type, team_name, player_name, game_id, phone,
                 email, teammates, transaction_id, payment_screenshot_url, status,
                 created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)
            "#,
        )
        .bind(&created.id)
        .bind(created.game_type.as_str())
        .bind(created.tournament_type.as_str())
        .bind(&created.team_name)
        .bind(&created.player_name)
        .bind(&created.game_id)
        .bind(&created.phone)
        .bind(&created.email)
        .bind(serde_json::to_string(&created.teammates)?)
        .bind(&created.transaction_id)
        .bind(&created.payment_screenshot_url)
        .bind(created.status.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await
        .db()?;

        tx.commit().await.db()?;
        Ok(created)
    }

    async fn get_registration(&self, id: &str) -> Result<Option<Registration>> {
        let mut conn = self.pool.acquire().await.db()?;
        fetch_registration(&mut conn, id).await
    }

    async fn list_registrations(&self, filter: &RegistrationFilter) -> Result<Vec<Registration>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM registrations WHERE 1 = 1",
            REGISTRATION_COLUMNS
        ));

        if let Some(game_type) = filter.game_type {
            qb.push(" AND game_type = ").push_bind(game_type.as_str());
        }
        if let Some(tournament_type) = filter.tournament_type {
            qb.push(" AND tournament_type = ")
                .push_bind(tournament_type.as_str());
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(flagged) = filter.flagged {
            qb.push(" AND is_flagged = ").push_bind(flagged);
        }
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search);
            qb.push(" AND (player_name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR team_name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR game_id LIKE ")
                .push_bind(pattern.clone())
                .push(" OR phone LIKE ")
                .push_bind(pattern.clone())
                .push(" OR transaction_id LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY created_at DESC");

        let rows: Vec<RegistrationRow> = qb.build_query_as().fetch_all(&self.pool).await.db()?;
        rows.into_iter().map(Registration::try_from).collect()
    }

    async fn update_registration_status(
        &self,
        id: &str,
        status: RegistrationStatus,
    ) -> Result<Registration> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.db()?;

        let mut registration = claim_registration(&mut tx, id, now).await?;
        let key = registration.tournament_key();
        match (registration.status.holds_slot(), status.holds_slot()) {
            (true, false) => release_slot(&mut tx, key, now).await?,
            (false, true) => {
                check_game_id(&mut tx, key, &registration.game_id, Some(id)).await?;
                take_slot(&mut tx, key, false, now).await?;
            }
            _ => {}
        }

        sqlx::query("UPDATE registrations SET status = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(status.as_str())
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await
            .db()?;

        tx.commit().await.db()?;

        registration.status = status;
        registration.updated_at = now;
        Ok(registration)
    }

    async fn update_registration_details(
        &self,
        id: &str,
        details: &ValidRegistration,
        admin_notes: Option<&str>,
    ) -> Result<Registration> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.db()?;

        let current = claim_registration(&mut tx, id, now).await?;
        if current.tournament_key() != details.key {
            return Err(ArenaError::validation(
                "A registration cannot be moved to another tournament",
            ));
        }
        check_duplicates(&mut tx, details, Some(id)).await?;

        sqlx::query(
            r#"
            UPDATE registrations
            SET team_name = ?1, player_name = ?2, game_id = ?3, phone = ?4, email = ?5,
                teammates = ?6, transaction_id = ?7, payment_screenshot_url = ?8,
                admin_notes = COALESCE(?9, admin_notes), updated_at = ?10
            WHERE id = ?11
            "#,
        )
        .bind(&details.team_name)
        .bind(&details.player_name)
        .bind(&details.game_id)
        .bind(&details.phone)
        .bind(&details.email)
        .bind(serde_json::to_string(&details.teammates)?)
        .bind(&details.transaction_id)
        .bind(&details.payment_screenshot_url)
        .bind(admin_notes)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await
        .db()?;

        let updated = fetch_registration(&mut tx, id)
            .await?
            .ok_or_else(ArenaError::registration_not_found)?;
        tx.commit().await.db()?;
        Ok(updated)
    }

    async fn set_registration_flag(
        &self,
        id: &str,
        flagged: bool,
        reason: Option<&str>,
    ) -> Result<Registration> {
        let reason = if flagged { reason } else { None };
        let result = sqlx::query(
            "UPDATE registrations SET is_flagged = ?1, flag_reason = ?2, updated_at = ?3 WHERE id = ?4",
        )
        .bind(flagged)
        .bind(reason)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .db()?;

        if result.rows_affected() == 0 {
            return Err(ArenaError::registration_not_found());
        }
        self.get_registration(id)
            .await?
            .ok_or_else(ArenaError::registration_not_found)
    }

    async fn set_payment_verified(&self, id: &str, verified: bool) -> Result<Registration> {
        let result = sqlx::query(
            "UPDATE registrations SET payment_verified = ?1, updated_at = ?2 WHERE id = ?3",
        )
        .bind(verified)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .db()?;

        if result.rows_affected() == 0 {
            return Err(ArenaError::registration_not_found());
        }
        self.get_registration(id)
            .await?
            .ok_or_else(ArenaError::registration_not_found)
    }

    async fn delete_registration(&self, id: &str) -> Result<Registration> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.db()?;

        let registration = claim_registration(&mut tx, id, now).await?;

        sqlx::query("DELETE FROM registrations WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .db()?;

        if registration.status.holds_slot() {
            release_slot(&mut tx, registration.tournament_key(), now).await?;
        }

        tx.commit().await.db()?;
        Ok(registration)
    }

    async fn registration_counts(&self) -> Result<RegistrationCounts> {
        let (total, pending, approved, rejected, flagged, payment_verified): (
            i64,
            i64,
            i64,
            i64,
            i64,
            i64,
        ) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(status = 'pending'), 0),
                   COALESCE(SUM(status = 'approved'), 0),
                   COALESCE(SUM(status = 'rejected'), 0),
                   COALESCE(SUM(is_flagged), 0),
                   COALESCE(SUM(payment_verified), 0)
            FROM registrations
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .db()?;

        Ok(RegistrationCounts {
            total,
            pending,
            approved,
            rejected,
            flagged,
            payment_verified,
        })
    }
}

#[async_trait]
impl AdminStore for Database {
    async fn ensure_admin(&self, username: &str, password_hash: &str) -> Result<bool> {
        let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await
            .db()?;
        if existing > 0 {
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO admins (id, username, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .db()?;

        Ok(true)
    }

    async fn get_admin_credentials(&self, username: &str) -> Result<Option<(AdminInfo, String)>> {
        let row: Option<AdminRow> = sqlx::query_as(
            r#"
            SELECT id, username, password_hash, last_login_at FROM admins WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .db()?;

        Ok(row.map(|r| {
            let hash = r.password_hash.clone();
            (r.into(), hash)
        }))
    }

    async fn get_admin(&self, id: &str) -> Result<Option<AdminInfo>> {
        let row: Option<AdminRow> = sqlx::query_as(
            r#"
            SELECT id, username, password_hash, last_login_at FROM admins WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .db()?;

        Ok(row.map(Into::into))
    }

    async fn get_admin_password_hash(&self, id: &str) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT password_hash FROM admins WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .db()?;

        Ok(row.map(|(hash,)| hash))
    }

    async fn update_admin_password(&self, id: &str, password_hash: &str) -> Result<()> {
        let result = sqlx::query("UPDATE admins SET password_hash = ?1 WHERE id = ?2")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .db()?;

        if result.rows_affected() == 0 {
            return Err(ArenaError::not_found("Admin not found"));
        }
        Ok(())
    }

    async fn record_admin_login(&self, id: &str) -> Result<()> {
        sqlx::query("UPDATE admins SET last_login_at = ?1 WHERE id = ?2")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .db()?;

        Ok(())
    }
}

#[async_trait]
impl ActivityLogStore for Database {
    async fn append_activity(&self, entry: &ActivityLog) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_logs
                (id, action, target_type, target_id, admin_username, details, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&entry.id)
        .bind(entry.action.as_str())
        .bind(entry.target_type.as_str())
        .bind(&entry.target_id)
        .bind(&entry.admin_username)
        .bind(&entry.details)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .db()?;

        Ok(())
    }

    async fn list_activity(&self, limit: i64) -> Result<Vec<ActivityLog>> {
        let rows: Vec<ActivityRow> = sqlx::query_as(
            r#"
            SELECT id, action, target_type, target_id, admin_username, details, created_at
            FROM activity_logs
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .db()?;

        rows.into_iter().map(ActivityLog::try_from).collect()
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct TournamentRow {
    id: String,
    game_type: String,
    tournament_type: String,
    name: String,
    entry_fee: i64,
    prize_pool: i64,
    max_slots: i64,
    registered_count: i64,
    qr_code_url: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TournamentRow> for Tournament {
    type Error = ArenaError;

    fn try_from(r: TournamentRow) -> Result<Self> {
        Ok(Tournament {
            id: r.id,
            game_type: r.game_type.parse().map_err(corrupt)?,
            tournament_type: r.tournament_type.parse().map_err(corrupt)?,
            name: r.name,
            entry_fee: r.entry_fee,
            prize_pool: r.prize_pool,
            max_slots: r.max_slots,
            registered_count: r.registered_count,
            qr_code_url: r.qr_code_url,
            is_active: r.is_active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RegistrationRow {
    id: String,
    game_type: String,
    tournament_type: String,
    team_name: Option<String>,
    player_name: String,
    game_id: String,
    phone: String,
    email: Option<String>,
    teammates: String,
    transaction_id: String,
    payment_screenshot_url: Option<String>,
    status: String,
    is_flagged: bool,
    flag_reason: Option<String>,
    payment_verified: bool,
    admin_notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = ArenaError;

    fn try_from(r: RegistrationRow) -> Result<Self> {
        let teammates: Vec<Teammate> = serde_json::from_str(&r.teammates)
            .map_err(|e| ArenaError::Database(format!("Corrupt teammates column: {}", e)))?;

        Ok(Registration {
            id: r.id,
            game_type: r.game_type.parse().map_err(corrupt)?,
            tournament_type: r.tournament_type.parse().map_err(corrupt)?,
            team_name: r.team_name,
            player_name: r.player_name,
            game_id: r.game_id,
            phone: r.phone,
            email: r.email,
            teammates,
            transaction_id: r.transaction_id,
            payment_screenshot_url: r.payment_screenshot_url,
            status: r.status.parse().map_err(corrupt)?,
            is_flagged: r.is_flagged,
            flag_reason: r.flag_reason,
            payment_verified: r.payment_verified,
            admin_notes: r.admin_notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: String,
    username: String,
    password_hash: String,
    last_login_at: Option<DateTime<Utc>>,
}

impl From<AdminRow> for AdminInfo {
    fn from(r: AdminRow) -> Self {
        AdminInfo {
            id: r.id,
            username: r.username,
            last_login_at: r.last_login_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: String,
    action: String,
    target_type: String,
    target_id: String,
    admin_username: String,
    details: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ActivityRow> for ActivityLog {
    type Error = ArenaError;

    fn try_from(r: ActivityRow) -> Result<Self> {
        Ok(ActivityLog {
            id: r.id,
            action: r.action.parse().map_err(corrupt)?,
            target_type: r.target_type.parse().map_err(corrupt)?,
            target_id: r.target_id,
            admin_username: r.admin_username,
            details: r.details,
            created_at: r.created_at,
        })
    }
}

fn corrupt(e: arena_core::ParseEnumError) -> ArenaError {
    ArenaError::Database(format!("Corrupt row: {}", e))
}
