// ABOUTME: Database operations for the session-type and exercise catalog
// ABOUTME: Read-mostly tables seeded by migration; the seed tool can replace them wholesale
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::errors::{AppError, AppResult};
use crate::models::{CatalogExercise, SessionType};

/// Catalog database operations manager
pub struct CatalogManager {
    pool: SqlitePool,
}

impl CatalogManager {
    /// Create a new catalog manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All session types in catalog order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_session_types(&self) -> AppResult<Vec<SessionType>> {
        let rows = sqlx::query(
            "SELECT name, description, category FROM session_types ORDER BY sort_order, name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list session types: {e}")))?;

        Ok(rows.iter().map(row_to_session_type).collect())
    }

    /// Look up a session type by exact name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_session_type(&self, name: &str) -> AppResult<Option<SessionType>> {
        let row =
            sqlx::query("SELECT name, description, category FROM session_types WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to get session type: {e}")))?;

        Ok(row.as_ref().map(row_to_session_type))
    }

    /// All exercises in catalog order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a tag list is malformed
    pub async fn list_exercises(&self) -> AppResult<Vec<CatalogExercise>> {
        let rows = sqlx::query(
            "SELECT name, muscle_group, secondary, sessions FROM exercises ORDER BY sort_order, name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?;

        rows.iter().map(row_to_exercise).collect()
    }

    /// Exercises tagged with the given session type
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a tag list is malformed
    pub async fn list_exercises_for_session(
        &self,
        session_type: &str,
    ) -> AppResult<Vec<CatalogExercise>> {
        let rows = sqlx::query(
            r"
            SELECT e.name, e.muscle_group, e.secondary, e.sessions
            FROM exercises e
            WHERE EXISTS (SELECT 1 FROM json_each(e.sessions) WHERE json_each.value = $1)
            ORDER BY e.sort_order, e.name
            ",
        )
        .bind(session_type)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list exercises for session: {e}")))?;

        rows.iter().map(row_to_exercise).collect()
    }

    /// Distinct primary muscle groups, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_muscle_groups(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar("SELECT DISTINCT muscle_group FROM exercises ORDER BY muscle_group")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list muscle groups: {e}")))
    }

    /// Replace the whole catalog in one transaction
    ///
    /// Entries keep the order they are given in.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is changed in that case
    pub async fn replace_all(
        &self,
        session_types: &[SessionType],
        exercises: &[CatalogExercise],
    ) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query("DELETE FROM exercises")
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear exercises: {e}")))?;
        sqlx::query("DELETE FROM session_types")
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear session types: {e}")))?;

        for (order, session_type) in (0_i64..).zip(session_types) {
            sqlx::query(
                "INSERT INTO session_types (name, description, category, sort_order) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(&session_type.name)
            .bind(&session_type.description)
            .bind(&session_type.category)
            .bind(order)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to insert session type '{}': {e}",
                    session_type.name
                ))
            })?;
        }

        for (order, exercise) in (0_i64..).zip(exercises) {
            let sessions_json = serde_json::to_string(&exercise.sessions)?;
            sqlx::query(
                "INSERT INTO exercises (name, muscle_group, secondary, sessions, sort_order) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&exercise.name)
            .bind(&exercise.muscle_group)
            .bind(&exercise.secondary)
            .bind(&sessions_json)
            .bind(order)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to insert exercise '{}': {e}", exercise.name))
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit catalog: {e}")))
    }
}

fn row_to_session_type(row: &SqliteRow) -> SessionType {
    SessionType {
        name: row.get("name"),
        description: row.get("description"),
        category: row.get("category"),
    }
}

fn row_to_exercise(row: &SqliteRow) -> AppResult<CatalogExercise> {
    let sessions_json: String = row.get("sessions");
    Ok(CatalogExercise {
        name: row.get("name"),
        muscle_group: row.get("muscle_group"),
        secondary: row.get("secondary"),
        sessions: serde_json::from_str(&sessions_json)?,
    })
}
