// ABOUTME: Database operations for the append-only workout set log
// ABOUTME: set_number is taken from a per-(session, exercise) counter in the same transaction as the insert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{column_u32, format_instant, parse_instant};
use crate::errors::{AppError, AppResult};
use crate::models::{stored_now, NewWorkoutSet, WorkoutSet};

pub(super) const SET_COLUMNS: &str =
    "id, session_id, exercise_name, weight, reps, rpe, notes, set_number, timestamp";

/// Workout set database operations manager
///
/// There is intentionally no update or delete; the schema rejects both.
pub struct WorkoutSetManager {
    pool: SqlitePool,
}

impl WorkoutSetManager {
    /// Create a new workout set manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a set, assigning the next `set_number` for its exercise
    ///
    /// The counter upsert runs first so the transaction takes the write lock
    /// before reading anything; concurrent appends therefore serialise and
    /// receive distinct, gap-free numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter bump or insert fails
    pub async fn append(&self, new_set: &NewWorkoutSet) -> AppResult<WorkoutSet> {
        let id = Uuid::new_v4();
        let timestamp = stored_now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let set_number: i64 = sqlx::query_scalar(
            r"
            INSERT INTO set_counters (session_id, exercise_name, last_set_number)
            VALUES ($1, $2, 1)
            ON CONFLICT (session_id, exercise_name)
            DO UPDATE SET last_set_number = last_set_number + 1
            RETURNING last_set_number
            ",
        )
        .bind(&new_set.session_id)
        .bind(&new_set.exercise_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to assign set number: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO workout_sets (
                id, session_id, exercise_name, weight, reps, rpe, notes,
                set_number, timestamp, volume
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(id.to_string())
        .bind(&new_set.session_id)
        .bind(&new_set.exercise_name)
        .bind(new_set.weight)
        .bind(i64::from(new_set.reps))
        .bind(new_set.rpe.map(i64::from))
        .bind(&new_set.notes)
        .bind(set_number)
        .bind(format_instant(timestamp))
        .bind(new_set.volume())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert workout set: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit workout set: {e}")))?;

        Ok(WorkoutSet {
            id,
            session_id: new_set.session_id.clone(),
            exercise_name: new_set.exercise_name.clone(),
            weight: new_set.weight,
            reps: new_set.reps,
            rpe: new_set.rpe,
            notes: new_set.notes.clone(),
            set_number: column_u32(set_number, "set_number")?,
            timestamp,
        })
    }

    /// All sets of a session, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn list_for_session(&self, session_id: &str) -> AppResult<Vec<WorkoutSet>> {
        let rows = sqlx::query(&format!(
            "SELECT {SET_COLUMNS} FROM workout_sets WHERE session_id = $1 \
             ORDER BY timestamp ASC, rowid ASC"
        ))
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workout sets: {e}")))?;

        rows.iter().map(row_to_workout_set).collect()
    }

    /// Most recent set of an exercise within a session
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn last_for(
        &self,
        session_id: &str,
        exercise_name: &str,
    ) -> AppResult<Option<WorkoutSet>> {
        let row = sqlx::query(&format!(
            "SELECT {SET_COLUMNS} FROM workout_sets \
             WHERE session_id = $1 AND exercise_name = $2 \
             ORDER BY timestamp DESC, rowid DESC LIMIT 1"
        ))
        .bind(session_id)
        .bind(exercise_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get last workout set: {e}")))?;

        row.map(|r| row_to_workout_set(&r)).transpose()
    }

    /// Number of sets of an exercise within a session
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_for(&self, session_id: &str, exercise_name: &str) -> AppResult<u32> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM workout_sets WHERE session_id = $1 AND exercise_name = $2",
        )
        .bind(session_id)
        .bind(exercise_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count workout sets: {e}")))?;

        column_u32(count, "count")
    }
}

pub(super) fn row_to_workout_set(row: &SqliteRow) -> AppResult<WorkoutSet> {
    let id_str: String = row.get("id");
    let reps: i64 = row.get("reps");
    let rpe: Option<i64> = row.get("rpe");
    let set_number: i64 = row.get("set_number");
    let timestamp_str: String = row.get("timestamp");

    let id = Uuid::parse_str(&id_str)
        .map_err(|e| AppError::internal(format!("Invalid workout set UUID: {e}")))?;
    let rpe = rpe
        .map(|value| {
            u8::try_from(value)
                .map_err(|_| AppError::internal(format!("Column rpe out of range: {value}")))
        })
        .transpose()?;

    Ok(WorkoutSet {
        id,
        session_id: row.get("session_id"),
        exercise_name: row.get("exercise_name"),
        weight: row.get("weight"),
        reps: column_u32(reps, "reps")?,
        rpe,
        notes: row.get("notes"),
        set_number: column_u32(set_number, "set_number")?,
        timestamp: parse_instant(&timestamp_str)?,
    })
}
