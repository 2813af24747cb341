// ABOUTME: Append-only set log used by the set endpoints and the aggregator
// ABOUTME: Logging a set appends it and then bumps the running totals of its session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use std::sync::Arc;

use tracing::{info, warn};

use super::aggregator::SessionAggregator;
use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::errors::AppResult;
use crate::models::{NewWorkoutSet, WorkoutSet};

/// Access to the workout set log
///
/// Sets are never checked against an existing session: a set logged for an
/// unknown or ended session is stored as-is and simply never counted.
#[derive(Clone)]
pub struct SetLogStore {
    database: Arc<Database>,
}

impl SetLogStore {
    /// Create a set log over the given store
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Append a validated set and return it with its assigned `set_number`
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails
    pub async fn append(&self, new_set: &NewWorkoutSet) -> AppResult<WorkoutSet> {
        self.database.append_workout_set(new_set).await
    }

    /// Append a set and feed it into the session's running totals
    ///
    /// The increment is best-effort: failing to update totals is logged and
    /// does not fail the append, because the exact totals are recomputed
    /// from the log when the session ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the append itself fails
    #[tracing::instrument(
        skip(self, aggregator, new_set),
        fields(session_id = %new_set.session_id, exercise = %new_set.exercise_name)
    )]
    pub async fn log_set(
        &self,
        aggregator: &SessionAggregator,
        new_set: &NewWorkoutSet,
    ) -> AppResult<WorkoutSet> {
        let stored = self.append(new_set).await?;
        info!(set_number = stored.set_number, "Workout set logged");

        if let Err(e) = aggregator
            .record_increment(&stored.session_id, 1, stored.volume())
            .await
        {
            warn!(error = %e, "Failed to update running session totals");
        }

        Ok(stored)
    }

    /// All sets of a session, oldest first (empty for unknown sessions)
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn list_for_session(&self, session_id: &str) -> AppResult<Vec<WorkoutSet>> {
        self.database.list_workout_sets(session_id).await
    }

    /// Most recent set of an exercise within a session
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn last_for(
        &self,
        session_id: &str,
        exercise_name: &str,
    ) -> AppResult<Option<WorkoutSet>> {
        self.database
            .last_workout_set(session_id, exercise_name)
            .await
    }

    /// Number of sets of an exercise within a session
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn count_for(&self, session_id: &str, exercise_name: &str) -> AppResult<u32> {
        self.database
            .count_workout_sets(session_id, exercise_name)
            .await
    }
}
