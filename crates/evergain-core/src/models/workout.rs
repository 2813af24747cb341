// ABOUTME: Standalone workout submissions and the AI feedback attached to them
// ABOUTME: Independent of session tracking; each submission is judged against recent history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stored_now;
use crate::errors::{AppError, AppResult};

/// Progress verdict produced by the feedback advisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// Progressive overload achieved
    ProgressUp,
    /// No meaningful change
    Stagnant,
    /// Ego lifting or injury risk
    Unsafe,
    /// Performance dropped
    Down,
    /// Verdict could not be determined
    Unknown,
}

impl ProgressStatus {
    /// Parse the advisor's status string, mapping unrecognised values to `Unknown`
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "progress_up" => Self::ProgressUp,
            "stagnant" => Self::Stagnant,
            "unsafe" => Self::Unsafe,
            "down" => Self::Down,
            _ => Self::Unknown,
        }
    }

    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProgressUp => "progress_up",
            Self::Stagnant => "stagnant",
            Self::Unsafe => "unsafe",
            Self::Down => "down",
            Self::Unknown => "unknown",
        }
    }
}

/// Feedback returned by the advisor for one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutFeedback {
    /// Progress verdict
    pub status: ProgressStatus,
    /// Short coaching advice
    pub advice: String,
    /// Hex display color for the verdict
    pub color: String,
    /// Risk assessment (Safe / Caution / High Risk)
    pub risk: String,
}

/// Validated workout submission
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSubmission {
    /// Weight lifted
    pub weight: f64,
    /// Reps per set
    pub reps: u32,
    /// Number of sets
    pub sets: u32,
    /// Free-text feeling
    pub feeling: String,
}

impl WorkoutSubmission {
    /// Validate raw submission fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when weight, reps or sets are out of range
    pub fn new(weight: f64, reps: i64, sets: i64, feeling: Option<String>) -> AppResult<Self> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(AppError::invalid_input("weight must be a non-negative number"));
        }
        let reps = u32::try_from(reps)
            .ok()
            .filter(|r| *r > 0)
            .ok_or_else(|| AppError::invalid_input("reps must be a positive integer"))?;
        let sets = u32::try_from(sets)
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| AppError::invalid_input("sets must be a positive integer"))?;
        Ok(Self {
            weight,
            reps,
            sets,
            feeling: feeling.unwrap_or_default(),
        })
    }
}

/// Stored workout with its feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique workout identifier
    pub id: Uuid,
    /// Weight lifted
    pub weight: f64,
    /// Reps per set
    pub reps: u32,
    /// Number of sets
    pub sets: u32,
    /// Free-text feeling
    pub feeling: String,
    /// Progress verdict
    pub progress_state: ProgressStatus,
    /// Coaching advice
    pub advice: String,
    /// Display color
    pub color: String,
    /// Submission time
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// Build a workout record from a submission and its feedback
    #[must_use]
    pub fn from_submission(submission: WorkoutSubmission, feedback: WorkoutFeedback) -> Self {
        Self {
            id: Uuid::new_v4(),
            weight: submission.weight,
            reps: submission.reps,
            sets: submission.sets,
            feeling: submission.feeling,
            progress_state: feedback.status,
            advice: feedback.advice,
            color: feedback.color,
            created_at: stored_now(),
        }
    }
}
