// ABOUTME: Database operations for workout sessions
// ABOUTME: Start, finalize and increment are conditional writes so concurrent requests cannot corrupt a session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::workout_sets::{row_to_workout_set, SET_COLUMNS};
use super::{column_u32, format_instant, is_unique_violation, parse_instant};
use crate::errors::{AppError, AppResult};
use crate::models::{ExerciseSummary, Session, SessionTotals, WorkoutSet};

/// Folds a session's set log, oldest first, into its totals
pub type SetFold = fn(&[WorkoutSet]) -> SessionTotals;

const SESSION_COLUMNS: &str = "id, user_id, session_type, started_at, ended_at, \
     total_sets, total_volume, exercises_performed";

/// Session database operations manager
pub struct SessionManager {
    pool: SqlitePool,
}

impl SessionManager {
    /// Create a new session manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new active session
    ///
    /// The partial unique index on active sessions turns a second concurrent
    /// start for the same user into a conflict.
    ///
    /// # Errors
    ///
    /// Returns `ResourceConflict` if the user already has an active session,
    /// or a database error if the insert fails
    pub async fn create(&self, session: &Session) -> AppResult<()> {
        let exercises_json = serde_json::to_string(&session.exercises_performed)?;

        sqlx::query(
            r"
            INSERT INTO sessions (
                id, user_id, session_type, started_at, ended_at,
                total_sets, total_volume, exercises_performed
            ) VALUES ($1, $2, $3, $4, NULL, $5, $6, $7)
            ",
        )
        .bind(session.id.to_string())
        .bind(&session.user_id)
        .bind(&session.session_type)
        .bind(format_instant(session.started_at))
        .bind(i64::from(session.total_sets))
        .bind(session.total_volume)
        .bind(&exercises_json)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("User already has an active session")
            } else {
                AppError::database(format!("Failed to create session: {e}"))
            }
        })?;

        Ok(())
    }

    /// Get the user's active session, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn get_active(&self, user_id: &str) -> AppResult<Option<Session>> {
        let row = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE user_id = $1 AND ended_at IS NULL"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get active session: {e}")))?;

        row.map(|r| row_to_session(&r)).transpose()
    }

    /// Fold the session's set log and end the session in one transaction
    ///
    /// A no-op update on the active row takes the write lock before the log
    /// is read, so every append lands either in the fold or after the end.
    /// Returns `None` when the session was already ended or never existed.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement or the commit fails
    pub async fn finalize_from_log(
        &self,
        session_id: &str,
        ended_at: DateTime<Utc>,
        fold: SetFold,
    ) -> AppResult<Option<SessionTotals>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let claimed = sqlx::query(
            "UPDATE sessions SET total_sets = total_sets WHERE id = $1 AND ended_at IS NULL",
        )
        .bind(session_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to lock session: {e}")))?;
        if claimed.rows_affected() == 0 {
            return Ok(None);
        }

        let rows = sqlx::query(&format!(
            "SELECT {SET_COLUMNS} FROM workout_sets WHERE session_id = $1 \
             ORDER BY timestamp ASC, rowid ASC"
        ))
        .bind(session_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to read set log: {e}")))?;
        let sets = rows
            .iter()
            .map(row_to_workout_set)
            .collect::<AppResult<Vec<_>>>()?;
        let totals = fold(&sets);
        let exercises_json = serde_json::to_string(&totals.exercises_performed)?;

        let result = sqlx::query(
            r"
            UPDATE sessions
            SET ended_at = $1, total_sets = $2, total_volume = $3, exercises_performed = $4
            WHERE id = $5 AND ended_at IS NULL
            ",
        )
        .bind(format_instant(ended_at))
        .bind(i64::from(totals.total_sets))
        .bind(totals.total_volume)
        .bind(&exercises_json)
        .bind(session_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to finalize session: {e}")))?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit session end: {e}")))?;
        Ok(Some(totals))
    }

    /// Atomically add to the running totals of an active session
    ///
    /// Returns `false` when no active session matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn increment_totals(
        &self,
        session_id: &str,
        sets_delta: u32,
        volume_delta: f64,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE sessions
            SET total_sets = total_sets + $1, total_volume = total_volume + $2
            WHERE id = $3 AND ended_at IS NULL
            ",
        )
        .bind(i64::from(sets_delta))
        .bind(volume_delta)
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to increment session totals: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// List a user's sessions, most recent start first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn list_for_user(&self, user_id: &str, limit: u32) -> AppResult<Vec<Session>> {
        let rows = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE user_id = $1 \
             ORDER BY started_at DESC, rowid DESC LIMIT $2"
        ))
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list sessions: {e}")))?;

        rows.iter().map(row_to_session).collect()
    }
}

fn row_to_session(row: &SqliteRow) -> AppResult<Session> {
    let id_str: String = row.get("id");
    let started_at_str: String = row.get("started_at");
    let ended_at_str: Option<String> = row.get("ended_at");
    let total_sets: i64 = row.get("total_sets");
    let exercises_json: String = row.get("exercises_performed");

    let id = Uuid::parse_str(&id_str)
        .map_err(|e| AppError::internal(format!("Invalid session UUID: {e}")))?;
    let exercises_performed: Vec<ExerciseSummary> = serde_json::from_str(&exercises_json)?;

    Ok(Session {
        id,
        user_id: row.get("user_id"),
        session_type: row.get("session_type"),
        started_at: parse_instant(&started_at_str)?,
        ended_at: ended_at_str.as_deref().map(parse_instant).transpose()?,
        total_sets: column_u32(total_sets, "total_sets")?,
        total_volume: row.get("total_volume"),
        exercises_performed,
    })
}
