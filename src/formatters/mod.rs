// ABOUTME: Client-facing views of sessions, sets and workouts
// ABOUTME: Instants are stored in UTC and shifted to the display offset only here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

//! Response rendering
//!
//! Storage and services work exclusively with UTC instants. The views in
//! this module are the single place where an instant is rendered at the
//! configured fixed offset (WIB, `+07:00`, unless overridden), so the
//! conversion is a pure function of `(instant, offset)`.
//!
//! ```rust
//! use chrono::{FixedOffset, TimeZone, Utc};
//! use evergain_server::formatters::display_instant;
//!
//! let offset = FixedOffset::east_opt(7 * 3600).unwrap();
//! let instant = Utc.with_ymd_and_hms(2025, 1, 1, 3, 0, 0).unwrap();
//! assert_eq!(display_instant(instant, offset), "2025-01-01T10:00:00.000000+07:00");
//! ```

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ExerciseSummary, Session, Workout, WorkoutSet};

/// Render a UTC instant as ISO-8601 at the given offset
#[must_use]
pub fn display_instant(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant
        .with_timezone(&offset)
        .to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Session as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    /// Session identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Catalog session type
    pub session_type: String,
    /// Start instant at the display offset
    pub started_at: String,
    /// End instant at the display offset, `null` while active
    pub ended_at: Option<String>,
    /// Sets logged
    pub total_sets: u32,
    /// Volume lifted
    pub total_volume: f64,
    /// Per-exercise breakdown
    pub exercises_performed: Vec<ExerciseSummary>,
    /// Whether the session still accepts sets
    pub is_active: bool,
    /// Minutes between start and end, present once ended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
}

impl SessionView {
    /// Render a session for the given display offset
    #[must_use]
    pub fn render(session: &Session, offset: FixedOffset) -> Self {
        Self {
            id: session.id.to_string(),
            user_id: session.user_id.clone(),
            session_type: session.session_type.clone(),
            started_at: display_instant(session.started_at, offset),
            ended_at: session.ended_at.map(|ended| display_instant(ended, offset)),
            total_sets: session.total_sets,
            total_volume: session.total_volume,
            exercises_performed: session.exercises_performed.clone(),
            is_active: session.is_active(),
            duration_minutes: session.duration_minutes(),
        }
    }
}

/// Workout set as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSetView {
    /// Set identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Session the set belongs to
    pub session_id: String,
    /// Exercise name
    pub exercise_name: String,
    /// Weight lifted
    pub weight: f64,
    /// Repetitions
    pub reps: u32,
    /// Optional RPE
    pub rpe: Option<u8>,
    /// Optional notes
    pub notes: Option<String>,
    /// Position within the session for this exercise
    pub set_number: u32,
    /// Log instant at the display offset
    pub timestamp: String,
    /// weight x reps
    pub volume: f64,
}

impl WorkoutSetView {
    /// Render a set for the given display offset
    #[must_use]
    pub fn render(set: &WorkoutSet, offset: FixedOffset) -> Self {
        Self {
            id: set.id.to_string(),
            session_id: set.session_id.clone(),
            exercise_name: set.exercise_name.clone(),
            weight: set.weight,
            reps: set.reps,
            rpe: set.rpe,
            notes: set.notes.clone(),
            set_number: set.set_number,
            timestamp: display_instant(set.timestamp, offset),
            volume: set.volume(),
        }
    }

    /// Render a list of sets, preserving order
    #[must_use]
    pub fn render_all(sets: &[WorkoutSet], offset: FixedOffset) -> Vec<Self> {
        sets.iter().map(|set| Self::render(set, offset)).collect()
    }
}

/// Workout submission with feedback as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutView {
    /// Workout identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Weight lifted
    pub weight: f64,
    /// Reps per set
    pub reps: u32,
    /// Number of sets
    pub sets: u32,
    /// Free-text feeling
    pub feeling: String,
    /// Advisor verdict
    pub progress_state: String,
    /// Coaching advice
    pub advice: String,
    /// Display color
    pub color: String,
    /// Submission instant at the display offset
    pub created_at: String,
}

impl WorkoutView {
    /// Render a workout for the given display offset
    #[must_use]
    pub fn render(workout: &Workout, offset: FixedOffset) -> Self {
        Self {
            id: workout.id.to_string(),
            weight: workout.weight,
            reps: workout.reps,
            sets: workout.sets,
            feeling: workout.feeling.clone(),
            progress_state: workout.progress_state.as_str().to_owned(),
            advice: workout.advice.clone(),
            color: workout.color.clone(),
            created_at: display_instant(workout.created_at, offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionTotals;
    use chrono::{Duration, TimeZone};

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    #[test]
    fn display_instant_shifts_to_offset_without_changing_the_instant() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 1, 20, 30, 0).unwrap();
        let rendered = display_instant(instant, wib());
        assert_eq!(rendered, "2025-03-02T03:30:00.000000+07:00");
        let parsed = DateTime::parse_from_rfc3339(&rendered).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), instant);
    }

    #[test]
    fn active_session_view_has_no_duration() {
        let session = Session::new("u1", "Push");
        let view = SessionView::render(&session, wib());
        assert!(view.is_active);
        assert!(view.ended_at.is_none());
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("duration_minutes").is_none());
        assert_eq!(json["_id"], session.id.to_string());
    }

    #[test]
    fn ended_session_view_reports_duration() {
        let mut session = Session::new("u1", "Legs");
        let ended = session.started_at + Duration::minutes(45);
        session.finalize(ended, SessionTotals::default());
        let view = SessionView::render(&session, wib());
        assert!(!view.is_active);
        assert_eq!(view.duration_minutes, Some(45.0));
    }
}
