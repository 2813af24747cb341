// ABOUTME: Store abstraction layer for the EverGain server
// ABOUTME: Defines the DatabaseProvider trait that services program against
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::SetFold;
use crate::errors::AppResult;
use crate::models::{
    CatalogExercise, NewWorkoutSet, Session, SessionTotals, SessionType, User, Workout, WorkoutSet,
};

/// Store handle factory with reconnect-on-use
pub mod factory;

/// Core store abstraction trait
///
/// All implementations must provide the same conditional-write semantics:
/// session creation fails with a conflict when the user already has an
/// active session, finalization and increments only touch active sessions,
/// and set numbers are assigned atomically.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Connect to the store and run migrations
    async fn new(database_url: &str) -> AppResult<Self>
    where
        Self: Sized;

    /// Run schema migrations
    async fn migrate(&self) -> AppResult<()>;

    /// Verify the store answers queries
    async fn health_check(&self) -> AppResult<()>;

    // ================================
    // Sessions
    // ================================

    /// Insert a new active session (conflict if the user already has one)
    async fn create_session(&self, session: &Session) -> AppResult<()>;

    /// Get the user's active session
    async fn get_active_session(&self, user_id: &str) -> AppResult<Option<Session>>;

    /// End an active session with totals folded from its set log
    ///
    /// The log read and the compare-and-set update share one transaction, so
    /// no append lands between them. `None` when the session was not active.
    async fn end_session(
        &self,
        session_id: &str,
        ended_at: DateTime<Utc>,
        fold: SetFold,
    ) -> AppResult<Option<SessionTotals>>;

    /// Atomic running-total increment; `false` when no active session matched
    async fn increment_session_totals(
        &self,
        session_id: &str,
        sets_delta: u32,
        volume_delta: f64,
    ) -> AppResult<bool>;

    /// A user's sessions, most recent start first
    async fn list_sessions(&self, user_id: &str, limit: u32) -> AppResult<Vec<Session>>;

    // ================================
    // Workout sets
    // ================================

    /// Append a set with the next set number
    async fn append_workout_set(&self, new_set: &NewWorkoutSet) -> AppResult<WorkoutSet>;

    /// All sets of a session, oldest first
    async fn list_workout_sets(&self, session_id: &str) -> AppResult<Vec<WorkoutSet>>;

    /// Most recent set of an exercise in a session
    async fn last_workout_set(
        &self,
        session_id: &str,
        exercise_name: &str,
    ) -> AppResult<Option<WorkoutSet>>;

    /// Number of sets of an exercise in a session
    async fn count_workout_sets(&self, session_id: &str, exercise_name: &str) -> AppResult<u32>;

    // ================================
    // Catalog
    // ================================

    /// All session types
    async fn list_session_types(&self) -> AppResult<Vec<SessionType>>;

    /// Session type by exact name
    async fn get_session_type(&self, name: &str) -> AppResult<Option<SessionType>>;

    /// All exercises
    async fn list_exercises(&self) -> AppResult<Vec<CatalogExercise>>;

    /// Exercises tagged with a session type
    async fn list_exercises_for_session(
        &self,
        session_type: &str,
    ) -> AppResult<Vec<CatalogExercise>>;

    /// Distinct primary muscle groups
    async fn list_muscle_groups(&self) -> AppResult<Vec<String>>;

    /// Replace the catalog atomically
    async fn replace_catalog(
        &self,
        session_types: &[SessionType],
        exercises: &[CatalogExercise],
    ) -> AppResult<()>;

    // ================================
    // Users
    // ================================

    /// Create a user (conflict on duplicate email)
    async fn create_user(&self, user: &User) -> AppResult<Uuid>;

    /// Get a user by ID
    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>>;

    /// Get a user by email
    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    // ================================
    // Workouts
    // ================================

    /// Store a workout submission with its feedback
    async fn create_workout(&self, workout: &Workout) -> AppResult<()>;

    /// Most recent workouts, newest first
    async fn list_workouts(&self, limit: u32) -> AppResult<Vec<Workout>>;
}
