// ABOUTME: Workout set model for individual logged exercise sets
// ABOUTME: Sets are validated once at construction and never mutated after they are stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Lowest accepted rate of perceived exertion
pub const MIN_RPE: u8 = 1;
/// Highest accepted rate of perceived exertion
pub const MAX_RPE: u8 = 10;

/// One stored performance of an exercise within a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Unique set identifier
    pub id: Uuid,
    /// Session this set was logged against (not enforced to exist)
    pub session_id: String,
    /// Exercise name
    pub exercise_name: String,
    /// Weight lifted
    pub weight: f64,
    /// Repetitions performed
    pub reps: u32,
    /// Optional rate of perceived exertion
    pub rpe: Option<u8>,
    /// Optional free-text notes
    pub notes: Option<String>,
    /// Position of this set for the exercise within the session, starting at 1
    pub set_number: u32,
    /// When the set was logged
    pub timestamp: DateTime<Utc>,
}

impl WorkoutSet {
    /// Volume of this set (weight x reps)
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

/// Validated input for appending a set to the log
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkoutSet {
    /// Target session identifier
    pub session_id: String,
    /// Exercise name (trimmed, non-empty)
    pub exercise_name: String,
    /// Weight lifted, finite and greater than zero
    pub weight: f64,
    /// Repetitions, greater than zero
    pub reps: u32,
    /// Optional RPE within `MIN_RPE..=MAX_RPE`
    pub rpe: Option<u8>,
    /// Optional notes
    pub notes: Option<String>,
}

impl NewWorkoutSet {
    /// Validate raw set fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when a field violates its constraint
    pub fn new(
        session_id: &str,
        exercise_name: &str,
        weight: f64,
        reps: i64,
        rpe: Option<i64>,
        notes: Option<String>,
    ) -> AppResult<Self> {
        let session_id = session_id.trim();
        if session_id.is_empty() {
            return Err(AppError::missing_field("session_id"));
        }
        let exercise_name = exercise_name.trim();
        if exercise_name.is_empty() {
            return Err(AppError::missing_field("exercise_name"));
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(AppError::invalid_input("weight must be greater than 0"));
        }
        let reps = u32::try_from(reps)
            .ok()
            .filter(|r| *r > 0)
            .ok_or_else(|| AppError::invalid_input("reps must be a positive integer"))?;
        let rpe = rpe
            .map(|value| {
                u8::try_from(value)
                    .ok()
                    .filter(|v| (MIN_RPE..=MAX_RPE).contains(v))
                    .ok_or_else(|| {
                        AppError::invalid_input(format!(
                            "rpe must be between {MIN_RPE} and {MAX_RPE}"
                        ))
                    })
            })
            .transpose()?;
        let notes = notes
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty());

        Ok(Self {
            session_id: session_id.to_owned(),
            exercise_name: exercise_name.to_owned(),
            weight,
            reps,
            rpe,
            notes,
        })
    }

    /// Volume this set will contribute once stored
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_set() {
        let set = NewWorkoutSet::new("s1", " Bench Press ", 60.0, 10, Some(8), None).unwrap();
        assert_eq!(set.exercise_name, "Bench Press");
        assert!((set.volume() - 600.0).abs() < f64::EPSILON);
        assert_eq!(set.rpe, Some(8));
    }

    #[test]
    fn rejects_non_positive_weight_and_reps() {
        assert!(NewWorkoutSet::new("s1", "Squat", 0.0, 5, None, None).is_err());
        assert!(NewWorkoutSet::new("s1", "Squat", f64::NAN, 5, None, None).is_err());
        assert!(NewWorkoutSet::new("s1", "Squat", 100.0, 0, None, None).is_err());
        assert!(NewWorkoutSet::new("s1", "Squat", 100.0, -3, None, None).is_err());
    }

    #[test]
    fn rejects_out_of_range_rpe() {
        let error = NewWorkoutSet::new("s1", "Squat", 100.0, 5, Some(11), None).unwrap_err();
        assert_eq!(error.message, "rpe must be between 1 and 10");
        assert!(NewWorkoutSet::new("s1", "Squat", 100.0, 5, Some(0), None).is_err());
    }

    #[test]
    fn blank_notes_are_dropped() {
        let set = NewWorkoutSet::new("s1", "Row", 50.0, 12, None, Some("  ".to_owned())).unwrap();
        assert!(set.notes.is_none());
    }
}
