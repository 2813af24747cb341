// ABOUTME: SQLite storage for sessions, workout sets, catalog, users and workouts
// ABOUTME: Owns the connection pool, runs embedded migrations and exposes per-table managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

/// Exercise and session-type catalog storage
pub mod catalog;
/// Workout session storage with conditional lifecycle writes
pub mod sessions;
/// User account storage
pub mod users;
/// Append-only workout set storage
pub mod workout_sets;
/// Standalone workout submission storage
pub mod workouts;

pub use catalog::CatalogManager;
pub use sessions::{SessionManager, SetFold};
pub use users::UserManager;
pub use workout_sets::WorkoutSetManager;
pub use workouts::WorkoutManager;

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{
    CatalogExercise, NewWorkoutSet, Session, SessionTotals, SessionType, User, Workout, WorkoutSet,
};

/// `SQLite` connection pool shared by all managers
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect to the store and run pending migrations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory of a file database cannot be created
    /// - The connection fails
    /// - A migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let connection_options = if database_url.contains(":memory:") {
            database_url.to_owned()
        } else {
            ensure_parent_dir(database_url).await?;
            if database_url.contains('?') {
                database_url.to_owned()
            } else {
                // Create the database file if it doesn't exist
                format!("{database_url}?mode=rwc")
            }
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run all embedded migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any migration fails
    pub async fn migrate(&self) -> AppResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Round-trip a trivial query
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot answer
    pub async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Health check failed: {e}")))?;
        Ok(())
    }

    /// Whether the pool has been closed
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Session storage
    #[must_use]
    pub fn sessions(&self) -> SessionManager {
        SessionManager::new(self.pool.clone())
    }

    /// Workout set storage
    #[must_use]
    pub fn workout_sets(&self) -> WorkoutSetManager {
        WorkoutSetManager::new(self.pool.clone())
    }

    /// Catalog storage
    #[must_use]
    pub fn catalog(&self) -> CatalogManager {
        CatalogManager::new(self.pool.clone())
    }

    /// User storage
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Workout submission storage
    #[must_use]
    pub fn workouts(&self) -> WorkoutManager {
        WorkoutManager::new(self.pool.clone())
    }
}

async fn ensure_parent_dir(database_url: &str) -> AppResult<()> {
    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            debug!(directory = %parent.display(), "Ensuring database directory exists");
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }
    Ok(())
}

/// Serialise an instant for storage
///
/// Fixed microsecond precision with a `Z` suffix keeps lexical order equal to
/// chronological order, which the ordered queries rely on.
#[must_use]
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored instant
///
/// # Errors
///
/// Returns an internal error if the column does not hold RFC 3339 text
pub fn parse_instant(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime '{value}': {e}")))
}

/// Whether a query failed on a UNIQUE constraint
#[must_use]
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_error) if db_error.is_unique_violation())
}

/// Convert a stored non-negative integer column
///
/// # Errors
///
/// Returns an internal error when the value does not fit in `u32`
pub fn column_u32(value: i64, column: &str) -> AppResult<u32> {
    u32::try_from(value)
        .map_err(|_| AppError::internal(format!("Column {column} out of range: {value}")))
}

#[async_trait]
impl DatabaseProvider for Database {
    async fn new(database_url: &str) -> AppResult<Self> {
        Self::new(database_url).await
    }

    async fn migrate(&self) -> AppResult<()> {
        self.migrate().await
    }

    async fn health_check(&self) -> AppResult<()> {
        self.health_check().await
    }

    async fn create_session(&self, session: &Session) -> AppResult<()> {
        self.sessions().create(session).await
    }

    async fn get_active_session(&self, user_id: &str) -> AppResult<Option<Session>> {
        self.sessions().get_active(user_id).await
    }

    async fn end_session(
        &self,
        session_id: &str,
        ended_at: DateTime<Utc>,
        fold: SetFold,
    ) -> AppResult<Option<SessionTotals>> {
        self.sessions().finalize_from_log(session_id, ended_at, fold).await
    }

    async fn increment_session_totals(
        &self,
        session_id: &str,
        sets_delta: u32,
        volume_delta: f64,
    ) -> AppResult<bool> {
        self.sessions()
            .increment_totals(session_id, sets_delta, volume_delta)
            .await
    }

    async fn list_sessions(&self, user_id: &str, limit: u32) -> AppResult<Vec<Session>> {
        self.sessions().list_for_user(user_id, limit).await
    }

    async fn append_workout_set(&self, new_set: &NewWorkoutSet) -> AppResult<WorkoutSet> {
        self.workout_sets().append(new_set).await
    }

    async fn list_workout_sets(&self, session_id: &str) -> AppResult<Vec<WorkoutSet>> {
        self.workout_sets().list_for_session(session_id).await
    }

    async fn last_workout_set(
        &self,
        session_id: &str,
        exercise_name: &str,
    ) -> AppResult<Option<WorkoutSet>> {
        self.workout_sets()
            .last_for(session_id, exercise_name)
            .await
    }

    async fn count_workout_sets(&self, session_id: &str, exercise_name: &str) -> AppResult<u32> {
        self.workout_sets()
            .count_for(session_id, exercise_name)
            .await
    }

    async fn list_session_types(&self) -> AppResult<Vec<SessionType>> {
        self.catalog().list_session_types().await
    }

    async fn get_session_type(&self, name: &str) -> AppResult<Option<SessionType>> {
        self.catalog().get_session_type(name).await
    }

    async fn list_exercises(&self) -> AppResult<Vec<CatalogExercise>> {
        self.catalog().list_exercises().await
    }

    async fn list_exercises_for_session(
        &self,
        session_type: &str,
    ) -> AppResult<Vec<CatalogExercise>> {
        self.catalog()
            .list_exercises_for_session(session_type)
            .await
    }

    async fn list_muscle_groups(&self) -> AppResult<Vec<String>> {
        self.catalog().list_muscle_groups().await
    }

    async fn replace_catalog(
        &self,
        session_types: &[SessionType],
        exercises: &[CatalogExercise],
    ) -> AppResult<()> {
        self.catalog().replace_all(session_types, exercises).await
    }

    async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        self.users().create(user).await
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.users().get(user_id).await
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users().get_by_email(email).await
    }

    async fn create_workout(&self, workout: &Workout) -> AppResult<()> {
        self.workouts().create(workout).await
    }

    async fn list_workouts(&self, limit: u32) -> AppResult<Vec<Workout>> {
        self.workouts().list_recent(limit).await
    }
}
