// ABOUTME: Integration tests for workout submissions and advisor feedback
// ABOUTME: Uses stub advisors to check history passing, stored verdicts and fallback handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{create_test_resources, create_test_resources_with_advisor};
use evergain_server::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
use evergain_server::formatters::WorkoutView;
use evergain_server::llm::FeedbackAdvisor;
use evergain_server::models::{ProgressStatus, Workout, WorkoutFeedback, WorkoutSubmission};
use evergain_server::server::Server;
use helpers::axum_test::AxumTestRequest;
use serde_json::json;

/// Answers progress_up and remembers how much history it was shown
#[derive(Default)]
struct RecordingAdvisor {
    history_sizes: Mutex<Vec<usize>>,
}

#[async_trait]
impl FeedbackAdvisor for RecordingAdvisor {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn analyze(
        &self,
        _current: &WorkoutSubmission,
        history: &[Workout],
    ) -> AppResult<WorkoutFeedback> {
        self.history_sizes.lock().unwrap().push(history.len());
        Ok(WorkoutFeedback {
            status: ProgressStatus::ProgressUp,
            advice: "Great job, add 2.5kg next time.".to_owned(),
            color: "#C6FF5E".to_owned(),
            risk: "Safe".to_owned(),
        })
    }
}

struct FailingAdvisor;

#[async_trait]
impl FeedbackAdvisor for FailingAdvisor {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn analyze(
        &self,
        _current: &WorkoutSubmission,
        _history: &[Workout],
    ) -> AppResult<WorkoutFeedback> {
        Err(AppError::external_service("llm", "upstream unavailable"))
    }
}

#[tokio::test]
async fn test_advisor_verdict_is_stored() {
    let advisor = Arc::new(RecordingAdvisor::default());
    let resources = create_test_resources_with_advisor(Some(advisor.clone()))
        .await
        .unwrap();
    let service = resources.workouts();

    let workout = service
        .submit(WorkoutSubmission::new(80.0, 5, 3, Some("strong".to_owned())).unwrap())
        .await
        .unwrap();

    assert_eq!(workout.progress_state, ProgressStatus::ProgressUp);
    assert_eq!(workout.color, "#C6FF5E");
    assert_eq!(workout.feeling, "strong");

    let listed = service.list_recent().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, workout.id);
}

#[tokio::test]
async fn test_advisor_sees_at_most_five_previous_workouts() {
    let advisor = Arc::new(RecordingAdvisor::default());
    let resources = create_test_resources_with_advisor(Some(advisor.clone()))
        .await
        .unwrap();
    let service = resources.workouts();

    for reps in 1..=7 {
        service
            .submit(WorkoutSubmission::new(60.0, reps, 3, None).unwrap())
            .await
            .unwrap();
    }

    let sizes = advisor.history_sizes.lock().unwrap().clone();
    assert_eq!(sizes, [0, 1, 2, 3, 4, 5, 5]);
}

#[tokio::test]
async fn test_missing_advisor_uses_fallback() {
    let resources = create_test_resources().await.unwrap();

    let workout = resources
        .workouts()
        .submit(WorkoutSubmission::new(80.0, 5, 3, None).unwrap())
        .await
        .unwrap();

    assert_eq!(workout.progress_state, ProgressStatus::Stagnant);
    assert_eq!(workout.advice, "Recorded. Keep pushing!");
    assert_eq!(workout.color, "#E0E0E0");
}

#[tokio::test]
async fn test_failing_advisor_uses_fallback() {
    let resources = create_test_resources_with_advisor(Some(Arc::new(FailingAdvisor)))
        .await
        .unwrap();

    let workout = resources
        .workouts()
        .submit(WorkoutSubmission::new(80.0, 5, 3, None).unwrap())
        .await
        .unwrap();

    assert_eq!(workout.progress_state, ProgressStatus::Stagnant);
    assert_eq!(workout.advice, "Recorded. Keep pushing!");
}

#[tokio::test]
async fn test_workout_routes() {
    let advisor = Arc::new(RecordingAdvisor::default());
    let resources = create_test_resources_with_advisor(Some(advisor)).await.unwrap();
    let router = Server::router(&resources);

    let response = AxumTestRequest::post("/api/workouts")
        .json(&json!({ "weight": 100.0, "reps": 5, "sets": 5, "feeling": "good" }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    let created: WorkoutView = response.json();
    assert_eq!(created.progress_state, "progress_up");
    assert_eq!(created.advice, "Great job, add 2.5kg next time.");
    assert!(created.created_at.ends_with("+07:00"));

    let response = AxumTestRequest::post("/api/workouts")
        .json(&json!({ "weight": 100.0, "reps": 5 }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "sets is required");

    let response = AxumTestRequest::post("/api/workouts")
        .json(&json!({ "weight": 100.0, "reps": "five", "sets": 5 }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = response.json();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let response = AxumTestRequest::get("/api/workouts").send(router).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let listed: Vec<WorkoutView> = response.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
}
