// ABOUTME: Database operations for standalone workout submissions
// ABOUTME: Each row stores the submission together with the feedback it received
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{column_u32, format_instant, parse_instant};
use crate::errors::{AppError, AppResult};
use crate::models::{ProgressStatus, Workout};

/// Workout database operations manager
pub struct WorkoutManager {
    pool: SqlitePool,
}

impl WorkoutManager {
    /// Create a new workout manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a workout with its feedback
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create(&self, workout: &Workout) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO workouts (
                id, weight, reps, sets, feeling, progress_state, advice, color, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(workout.id.to_string())
        .bind(workout.weight)
        .bind(i64::from(workout.reps))
        .bind(i64::from(workout.sets))
        .bind(&workout.feeling)
        .bind(workout.progress_state.as_str())
        .bind(&workout.advice)
        .bind(&workout.color)
        .bind(format_instant(workout.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        Ok(())
    }

    /// Most recent workouts, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn list_recent(&self, limit: u32) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT id, weight, reps, sets, feeling, progress_state, advice, color, created_at
            FROM workouts
            ORDER BY created_at DESC, rowid DESC
            LIMIT $1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        rows.iter().map(row_to_workout).collect()
    }
}

fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
    let id: String = row.get("id");
    let reps: i64 = row.get("reps");
    let sets: i64 = row.get("sets");
    let progress_state: String = row.get("progress_state");
    let created_at: String = row.get("created_at");

    Ok(Workout {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::internal(format!("Invalid workout UUID: {e}")))?,
        weight: row.get("weight"),
        reps: column_u32(reps, "reps")?,
        sets: column_u32(sets, "sets")?,
        feeling: row.get("feeling"),
        progress_state: ProgressStatus::parse(&progress_state),
        advice: row.get("advice"),
        color: row.get("color"),
        created_at: parse_instant(&created_at)?,
    })
}
