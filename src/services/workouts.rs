// ABOUTME: Standalone workout submissions judged by the feedback advisor
// ABOUTME: Advisor failures never fail a submission; a neutral fallback verdict is stored instead
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use std::sync::Arc;

use tracing::{info, warn};

use crate::constants::{fallback, limits};
use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::errors::AppResult;
use crate::llm::FeedbackAdvisor;
use crate::models::{ProgressStatus, Workout, WorkoutFeedback, WorkoutSubmission};

/// Feedback stored when the advisor is unavailable or fails
#[must_use]
pub fn fallback_feedback() -> WorkoutFeedback {
    WorkoutFeedback {
        status: ProgressStatus::Stagnant,
        advice: fallback::ADVICE.to_owned(),
        color: fallback::COLOR.to_owned(),
        risk: fallback::RISK.to_owned(),
    }
}

/// Workout submission service
#[derive(Clone)]
pub struct WorkoutService {
    database: Arc<Database>,
    advisor: Option<Arc<dyn FeedbackAdvisor>>,
}

impl WorkoutService {
    /// Create a workout service; without an advisor every submission gets fallback feedback
    #[must_use]
    pub fn new(database: Arc<Database>, advisor: Option<Arc<dyn FeedbackAdvisor>>) -> Self {
        Self { database, advisor }
    }

    /// Judge and store a submission
    ///
    /// # Errors
    ///
    /// Returns an error if history cannot be read or the workout cannot be stored
    #[tracing::instrument(skip(self, submission))]
    pub async fn submit(&self, submission: WorkoutSubmission) -> AppResult<Workout> {
        let history = self.database.list_workouts(limits::ADVISOR_HISTORY).await?;
        let feedback = self.feedback_for(&submission, &history).await;

        let workout = Workout::from_submission(submission, feedback);
        self.database.create_workout(&workout).await?;

        info!(
            workout_id = %workout.id,
            progress_state = workout.progress_state.as_str(),
            "Workout recorded"
        );
        Ok(workout)
    }

    /// Most recent workouts, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn list_recent(&self) -> AppResult<Vec<Workout>> {
        self.database.list_workouts(limits::WORKOUT_LIST_LIMIT).await
    }

    async fn feedback_for(
        &self,
        submission: &WorkoutSubmission,
        history: &[Workout],
    ) -> WorkoutFeedback {
        let Some(advisor) = &self.advisor else {
            return fallback_feedback();
        };
        match advisor.analyze(submission, history).await {
            Ok(feedback) => feedback,
            Err(e) => {
                warn!(advisor = advisor.name(), error = %e, "Feedback advisor failed, using fallback");
                fallback_feedback()
            }
        }
    }
}
