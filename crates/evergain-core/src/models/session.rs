// ABOUTME: Workout session model with lifecycle state and aggregate statistics
// ABOUTME: Sessions start active, accumulate totals while sets are logged, and end exactly once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stored_now;

/// Per-exercise rollup embedded in a finalized session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSummary {
    /// Exercise name as logged
    pub exercise: String,
    /// Number of sets performed
    pub sets: u32,
    /// Sum of reps across all sets
    pub total_reps: u32,
    /// Sum of set volumes (weight x reps)
    pub total_volume: f64,
    /// Heaviest weight used in any set
    pub max_weight: f64,
}

impl ExerciseSummary {
    /// Empty summary for an exercise seen for the first time
    #[must_use]
    pub fn new(exercise: impl Into<String>) -> Self {
        Self {
            exercise: exercise.into(),
            sets: 0,
            total_reps: 0,
            total_volume: 0.0,
            max_weight: 0.0,
        }
    }
}

/// Session totals produced by folding a set log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionTotals {
    /// Number of sets in the log
    pub total_sets: u32,
    /// Sum of all set volumes
    pub total_volume: f64,
    /// Per-exercise breakdown in first-encounter order
    pub exercises_performed: Vec<ExerciseSummary>,
}

/// A bounded period of exercise activity for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// Catalog session type name (e.g. "Push")
    pub session_type: String,
    /// When the session started
    pub started_at: DateTime<Utc>,
    /// When the session ended (`None` while active)
    pub ended_at: Option<DateTime<Utc>>,
    /// Number of sets logged
    pub total_sets: u32,
    /// Total volume lifted
    pub total_volume: f64,
    /// Per-exercise breakdown, populated when the session ends
    pub exercises_performed: Vec<ExerciseSummary>,
}

impl Session {
    /// Create a fresh active session with zero totals
    #[must_use]
    pub fn new(user_id: impl Into<String>, session_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            session_type: session_type.into(),
            started_at: stored_now(),
            ended_at: None,
            total_sets: 0,
            total_volume: 0.0,
            exercises_performed: Vec::new(),
        }
    }

    /// Whether the session still accepts sets
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Session length in minutes rounded to one decimal, once ended
    #[must_use]
    pub fn duration_minutes(&self) -> Option<f64> {
        self.ended_at
            .map(|ended_at| duration_minutes(self.started_at, ended_at))
    }

    /// Apply exact totals and mark the session ended
    pub fn finalize(&mut self, ended_at: DateTime<Utc>, totals: SessionTotals) {
        self.ended_at = Some(ended_at);
        self.total_sets = totals.total_sets;
        self.total_volume = totals.total_volume;
        self.exercises_performed = totals.exercises_performed;
    }
}

/// Minutes between two instants, rounded to one decimal place
#[must_use]
pub fn duration_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    // Millisecond precision is far below the one-decimal rounding
    #[allow(clippy::cast_precision_loss)]
    let seconds = (end - start).num_milliseconds() as f64 / 1000.0;
    (seconds / 60.0 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_session_is_active_with_zero_totals() {
        let session = Session::new("u1", "Push");
        assert!(session.is_active());
        assert_eq!(session.total_sets, 0);
        assert!(session.exercises_performed.is_empty());
        assert!(session.duration_minutes().is_none());
    }

    #[test]
    fn duration_rounds_to_one_decimal() {
        let start = Utc::now();
        let end = start + Duration::seconds(47 * 60 + 20);
        assert!((duration_minutes(start, end) - 47.3).abs() < f64::EPSILON);
    }

    #[test]
    fn finalize_marks_session_ended() {
        let mut session = Session::new("u1", "Legs");
        let ended_at = session.started_at + Duration::minutes(30);
        session.finalize(
            ended_at,
            SessionTotals {
                total_sets: 3,
                total_volume: 900.0,
                exercises_performed: vec![ExerciseSummary::new("Leg Press")],
            },
        );
        assert!(!session.is_active());
        assert_eq!(session.total_sets, 3);
        assert_eq!(session.duration_minutes(), Some(30.0));
    }

    #[test]
    fn json_round_trip_keeps_type_and_totals() {
        let mut session = Session::new("u1", "Push");
        let mut bench = ExerciseSummary::new("Bench Press");
        bench.sets = 2;
        bench.total_reps = 18;
        bench.total_volume = 1120.0;
        bench.max_weight = 65.0;
        session.finalize(
            session.started_at + Duration::minutes(45),
            SessionTotals {
                total_sets: 2,
                total_volume: 1120.0,
                exercises_performed: vec![bench],
            },
        );

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, session);
        assert_eq!(restored.session_type, "Push");
        assert_eq!(restored.exercises_performed[0].total_reps, 18);
    }
}
