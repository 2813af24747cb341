// ABOUTME: Session totals: cheap running increments while active and an exact fold at end
// ABOUTME: The fold is a pure function over the set log so it can be checked in isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::errors::AppResult;
use crate::models::{ExerciseSummary, Session, SessionTotals, WorkoutSet};

/// Relative tolerance when comparing running and exact volume
const VOLUME_DRIFT_TOLERANCE: f64 = 1e-9;

/// Maintains session aggregates
#[derive(Clone)]
pub struct SessionAggregator {
    database: Arc<Database>,
}

impl SessionAggregator {
    /// Create an aggregator over the given store
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Add a logged set to the running totals of an active session
    ///
    /// Best-effort: returns `false` when the session is unknown or already
    /// ended, in which case nothing changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the store update fails
    #[tracing::instrument(skip(self), fields(session_id = %session_id))]
    pub async fn record_increment(
        &self,
        session_id: &str,
        sets_delta: u32,
        volume_delta: f64,
    ) -> AppResult<bool> {
        let touched = self
            .database
            .increment_session_totals(session_id, sets_delta, volume_delta)
            .await?;
        if !touched {
            debug!("No active session matched running increment");
        }
        Ok(touched)
    }

    /// Recompute totals from every set logged against the session
    ///
    /// # Errors
    ///
    /// Returns an error if the set log cannot be read
    #[tracing::instrument(skip(self), fields(session_id = %session_id))]
    pub async fn recompute_exact(&self, session_id: &str) -> AppResult<SessionTotals> {
        let sets = self.database.list_workout_sets(session_id).await?;
        let totals = fold_sets(&sets);
        debug!(
            total_sets = totals.total_sets,
            total_volume = totals.total_volume,
            exercises = totals.exercises_performed.len(),
            "Recomputed session totals"
        );
        Ok(totals)
    }

    /// Fold the set log and end the session atomically
    ///
    /// Returns `None` when the session was not active at the time of the
    /// write, meaning another request ended it first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store transaction fails
    #[tracing::instrument(skip(self), fields(session_id = %session_id))]
    pub async fn finalize_exact(
        &self,
        session_id: &str,
        ended_at: DateTime<Utc>,
    ) -> AppResult<Option<SessionTotals>> {
        let totals = self
            .database
            .end_session(session_id, ended_at, fold_sets)
            .await?;
        if let Some(totals) = &totals {
            debug!(
                total_sets = totals.total_sets,
                total_volume = totals.total_volume,
                exercises = totals.exercises_performed.len(),
                "Finalized session totals"
            );
        }
        Ok(totals)
    }
}

/// Whether the running totals on `session` disagree with the exact fold
///
/// Logs both values of each total when they do.
pub fn running_totals_drifted(session: &Session, exact: &SessionTotals) -> bool {
    let scale = exact.total_volume.abs().max(1.0);
    let volume_drifted =
        (session.total_volume - exact.total_volume).abs() > VOLUME_DRIFT_TOLERANCE * scale;
    let sets_drifted = session.total_sets != exact.total_sets;
    if sets_drifted || volume_drifted {
        warn!(
            session_id = %session.id,
            running_sets = session.total_sets,
            exact_sets = exact.total_sets,
            running_volume = session.total_volume,
            exact_volume = exact.total_volume,
            "Running totals drifted from the set log"
        );
    }
    sets_drifted || volume_drifted
}

/// Fold a set log into session totals
///
/// Sets are expected in timestamp order; exercises appear in the order they
/// were first logged. `total_volume` and `total_sets` always equal the sums
/// over the per-exercise summaries.
#[must_use]
pub fn fold_sets(sets: &[WorkoutSet]) -> SessionTotals {
    let mut exercises: Vec<ExerciseSummary> = Vec::new();

    for set in sets {
        let index = if let Some(index) = exercises
            .iter()
            .position(|summary| summary.exercise == set.exercise_name)
        {
            index
        } else {
            exercises.push(ExerciseSummary::new(set.exercise_name.clone()));
            exercises.len() - 1
        };
        let summary = &mut exercises[index];
        summary.sets += 1;
        summary.total_reps = summary.total_reps.saturating_add(set.reps);
        summary.total_volume += set.volume();
        if set.weight > summary.max_weight {
            summary.max_weight = set.weight;
        }
    }

    let total_sets = exercises.iter().map(|summary| summary.sets).sum();
    let total_volume = exercises.iter().map(|summary| summary.total_volume).sum();

    SessionTotals {
        total_sets,
        total_volume,
        exercises_performed: exercises,
    }
}
