// ABOUTME: Domain model module organization for EverGain core
// ABOUTME: Re-exports session, workout set, catalog, workout and user models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

/// Static exercise and session-type catalog entries
pub mod catalog;
/// Workout sessions and their per-exercise summaries
pub mod session;
/// User accounts
pub mod user;
/// Standalone workout submissions and AI feedback
pub mod workout;
/// Individual logged exercise sets
pub mod workout_set;

use chrono::{DateTime, SubsecRound, Utc};

pub use catalog::{CatalogExercise, SessionType};
pub use session::{ExerciseSummary, Session, SessionTotals};
pub use user::{User, UserProfile};
pub use workout::{ProgressStatus, Workout, WorkoutFeedback, WorkoutSubmission};
pub use workout_set::{NewWorkoutSet, WorkoutSet, MAX_RPE, MIN_RPE};

/// Current instant at the microsecond precision instants are stored with
///
/// Records built from this value compare equal to what is read back.
#[must_use]
pub fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
