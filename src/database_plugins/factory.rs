// ABOUTME: Store handle used by the server with explicit connect/close and reconnect-on-use
// ABOUTME: Lets the server start degraded when the store is unreachable and recover once it returns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain
//! Store handle factory
//!
//! [`Database`] wraps the `SQLite` implementation behind a lazily (re)connected
//! slot. Every operation first obtains a live connection: if the slot is empty
//! or its pool was closed, a new connection is attempted. Failures surface as
//! `DatabaseError` for that request only.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::DatabaseProvider;
use crate::database::{Database as SqliteDatabase, SetFold};
use crate::errors::{AppError, AppResult};
use crate::models::{
    CatalogExercise, NewWorkoutSet, Session, SessionTotals, SessionType, User, Workout, WorkoutSet,
};

/// Supported store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// `SQLite` embedded database
    SQLite,
}

/// Reconnecting store handle shared across requests
#[derive(Clone)]
pub struct Database {
    database_url: Arc<str>,
    inner: Arc<RwLock<Option<SqliteDatabase>>>,
}

impl Database {
    /// Connect eagerly, failing if the store is unreachable
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is unsupported, the connection fails or a
    /// migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        detect_database_type(database_url)?;
        let db = SqliteDatabase::new(database_url).await?;
        info!("Database initialized: {}", redact_database_url(database_url));
        Ok(Self {
            database_url: Arc::from(database_url),
            inner: Arc::new(RwLock::new(Some(db))),
        })
    }

    /// Connect if possible, otherwise return a degraded handle that retries on use
    ///
    /// # Errors
    ///
    /// Returns an error only if the URL is not a supported store URL
    pub async fn connect_or_degraded(database_url: &str) -> AppResult<Self> {
        detect_database_type(database_url)?;
        let slot = match SqliteDatabase::new(database_url).await {
            Ok(db) => {
                info!("Database initialized: {}", redact_database_url(database_url));
                Some(db)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Database unavailable at startup, continuing in degraded mode"
                );
                None
            }
        };
        Ok(Self {
            database_url: Arc::from(database_url),
            inner: Arc::new(RwLock::new(slot)),
        })
    }

    /// Backend in use
    #[must_use]
    pub const fn database_type(&self) -> DatabaseType {
        DatabaseType::SQLite
    }

    /// Whether a live connection is currently held
    pub async fn is_connected(&self) -> bool {
        self.inner
            .read()
            .await
            .as_ref()
            .is_some_and(|db| !db.is_closed())
    }

    /// Close the pool; the next operation reconnects
    pub async fn close(&self) {
        if let Some(db) = self.inner.write().await.take() {
            db.close().await;
            info!("Database connection closed");
        }
    }

    /// Get a live connection, reconnecting when the slot is empty or closed
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if reconnection fails
    pub async fn connection(&self) -> AppResult<SqliteDatabase> {
        if let Some(db) = self.inner.read().await.as_ref() {
            if !db.is_closed() {
                return Ok(db.clone());
            }
        }

        let mut slot = self.inner.write().await;
        // Another request may have reconnected while we waited for the lock
        if let Some(db) = slot.as_ref() {
            if !db.is_closed() {
                return Ok(db.clone());
            }
        }

        debug!("Reconnecting to database");
        let db = SqliteDatabase::new(&self.database_url).await.map_err(|e| {
            warn!(error = %e, "Database reconnection failed");
            AppError::database(format!("Database unavailable: {}", e.message))
        })?;
        info!("Database connection re-established");
        *slot = Some(db.clone());
        Ok(db)
    }
}

#[async_trait]
impl DatabaseProvider for Database {
    async fn new(database_url: &str) -> AppResult<Self> {
        Self::new(database_url).await
    }

    async fn migrate(&self) -> AppResult<()> {
        self.connection().await?.migrate().await
    }

    async fn health_check(&self) -> AppResult<()> {
        self.connection().await?.health_check().await
    }

    async fn create_session(&self, session: &Session) -> AppResult<()> {
        self.connection().await?.create_session(session).await
    }

    async fn get_active_session(&self, user_id: &str) -> AppResult<Option<Session>> {
        self.connection().await?.get_active_session(user_id).await
    }

    async fn end_session(
        &self,
        session_id: &str,
        ended_at: DateTime<Utc>,
        fold: SetFold,
    ) -> AppResult<Option<SessionTotals>> {
        self.connection()
            .await?
            .end_session(session_id, ended_at, fold)
            .await
    }

    async fn increment_session_totals(
        &self,
        session_id: &str,
        sets_delta: u32,
        volume_delta: f64,
    ) -> AppResult<bool> {
        self.connection()
            .await?
            .increment_session_totals(session_id, sets_delta, volume_delta)
            .await
    }

    async fn list_sessions(&self, user_id: &str, limit: u32) -> AppResult<Vec<Session>> {
        self.connection().await?.list_sessions(user_id, limit).await
    }

    async fn append_workout_set(&self, new_set: &NewWorkoutSet) -> AppResult<WorkoutSet> {
        self.connection().await?.append_workout_set(new_set).await
    }

    async fn list_workout_sets(&self, session_id: &str) -> AppResult<Vec<WorkoutSet>> {
        self.connection().await?.list_workout_sets(session_id).await
    }

    async fn last_workout_set(
        &self,
        session_id: &str,
        exercise_name: &str,
    ) -> AppResult<Option<WorkoutSet>> {
        self.connection()
            .await?
            .last_workout_set(session_id, exercise_name)
            .await
    }

    async fn count_workout_sets(&self, session_id: &str, exercise_name: &str) -> AppResult<u32> {
        self.connection()
            .await?
            .count_workout_sets(session_id, exercise_name)
            .await
    }

    async fn list_session_types(&self) -> AppResult<Vec<SessionType>> {
        self.connection().await?.list_session_types().await
    }

    async fn get_session_type(&self, name: &str) -> AppResult<Option<SessionType>> {
        self.connection().await?.get_session_type(name).await
    }

    async fn list_exercises(&self) -> AppResult<Vec<CatalogExercise>> {
        self.connection().await?.list_exercises().await
    }

    async fn list_exercises_for_session(
        &self,
        session_type: &str,
    ) -> AppResult<Vec<CatalogExercise>> {
        self.connection()
            .await?
            .list_exercises_for_session(session_type)
            .await
    }

    async fn list_muscle_groups(&self) -> AppResult<Vec<String>> {
        self.connection().await?.list_muscle_groups().await
    }

    async fn replace_catalog(
        &self,
        session_types: &[SessionType],
        exercises: &[CatalogExercise],
    ) -> AppResult<()> {
        self.connection()
            .await?
            .replace_catalog(session_types, exercises)
            .await
    }

    async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        self.connection().await?.create_user(user).await
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.connection().await?.get_user(user_id).await
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.connection().await?.get_user_by_email(email).await
    }

    async fn create_workout(&self, workout: &Workout) -> AppResult<()> {
        self.connection().await?.create_workout(workout).await
    }

    async fn list_workouts(&self, limit: u32) -> AppResult<Vec<Workout>> {
        self.connection().await?.list_workouts(limit).await
    }
}

/// Redact credentials from a database URL before logging it
#[must_use]
pub fn redact_database_url(url: &str) -> String {
    if let Some(scheme_end) = url.find("://") {
        let after_scheme = &url[scheme_end + 3..];
        if let Some(at_pos) = after_scheme.find('@') {
            let userinfo = &after_scheme[..at_pos];
            if let Some(colon_pos) = userinfo.find(':') {
                let username = &userinfo[..colon_pos];
                let rest = &after_scheme[at_pos..];
                return format!("{}://{username}:***{rest}", &url[..scheme_end]);
            }
        }
    }
    url.to_owned()
}

/// Detect the backend from a connection string
///
/// # Errors
///
/// Returns `ConfigError` if the URL is empty or not a `sqlite:` URL
pub fn detect_database_type(database_url: &str) -> AppResult<DatabaseType> {
    if database_url.starts_with("sqlite:") {
        Ok(DatabaseType::SQLite)
    } else if database_url.is_empty() {
        Err(AppError::config("DATABASE_URL is empty"))
    } else {
        Err(AppError::config(format!(
            "Unsupported database URL: {}. Expected a sqlite: URL",
            redact_database_url(database_url)
        )))
    }
}
