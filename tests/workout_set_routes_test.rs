// ABOUTME: Integration tests for the workout set HTTP endpoints
// ABOUTME: Covers logging validation, set numbering and per-exercise lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::{http::StatusCode, Router};
use common::create_test_resources;
use evergain_server::errors::{ErrorCode, ErrorResponse};
use evergain_server::formatters::WorkoutSetView;
use evergain_server::routes::workout_sets::{LastSetResponse, SetCountResponse};
use evergain_server::server::Server;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

async fn setup() -> Router {
    let resources = create_test_resources().await.unwrap();
    Server::router(&resources)
}

async fn log(router: &Router, body: Value) -> helpers::axum_test::AxumTestResponse {
    AxumTestRequest::post("/api/workout-sets/log")
        .json(&body)
        .send(router.clone())
        .await
}

#[tokio::test]
async fn test_log_set_returns_numbered_set() {
    let router = setup().await;

    let response = log(
        &router,
        json!({
            "session_id": "s1",
            "exercise_name": "Squat",
            "weight": 100.0,
            "reps": 5,
            "rpe": 8,
            "notes": "belt"
        }),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let set: WorkoutSetView = response.json();
    assert_eq!(set.session_id, "s1");
    assert_eq!(set.set_number, 1);
    assert_eq!(set.rpe, Some(8));
    assert_eq!(set.notes.as_deref(), Some("belt"));
    assert!((set.volume - 500.0).abs() < 1e-9);
    assert!(set.timestamp.ends_with("+07:00"));

    let response = log(
        &router,
        json!({ "session_id": "s1", "exercise_name": "Squat", "weight": 105.0, "reps": 5 }),
    )
    .await;
    let set: WorkoutSetView = response.json();
    assert_eq!(set.set_number, 2);
    assert!(set.rpe.is_none());
}

#[tokio::test]
async fn test_log_set_rejects_missing_fields() {
    let router = setup().await;

    for (body, message) in [
        (
            json!({ "exercise_name": "Squat", "weight": 100.0, "reps": 5 }),
            "session_id is required",
        ),
        (
            json!({ "session_id": "s1", "weight": 100.0, "reps": 5 }),
            "exercise_name is required",
        ),
        (
            json!({ "session_id": "s1", "exercise_name": "Squat", "reps": 5 }),
            "weight is required",
        ),
        (
            json!({ "session_id": "s1", "exercise_name": "Squat", "weight": 100.0 }),
            "reps is required",
        ),
    ] {
        let response = log(&router, body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
        assert_eq!(error.error, message);
    }
}

#[tokio::test]
async fn test_log_set_rejects_out_of_range_values() {
    let router = setup().await;

    for body in [
        json!({ "session_id": "s1", "exercise_name": "Squat", "weight": 0, "reps": 5 }),
        json!({ "session_id": "s1", "exercise_name": "Squat", "weight": 100.0, "reps": 0 }),
        json!({ "session_id": "s1", "exercise_name": "Squat", "weight": 100.0, "reps": 5, "rpe": 11 }),
    ] {
        let response = log(&router, body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert_eq!(error.code, ErrorCode::InvalidInput);
    }

    let response = AxumTestRequest::get("/api/workout-sets/session/s1")
        .send(router)
        .await;
    let sets: Vec<WorkoutSetView> = response.json();
    assert!(sets.is_empty());
}

#[tokio::test]
async fn test_last_set_and_count() {
    let router = setup().await;

    let response = AxumTestRequest::get("/api/workout-sets/last-set?session_id=s1&exercise_name=Row")
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let last: LastSetResponse = response.json();
    assert!(last.last_set.is_none());

    for weight in [50.0, 55.0] {
        log(
            &router,
            json!({ "session_id": "s1", "exercise_name": "Row", "weight": weight, "reps": 12 }),
        )
        .await;
    }

    let response = AxumTestRequest::get("/api/workout-sets/last-set?session_id=s1&exercise_name=Row")
        .send(router.clone())
        .await;
    let last: LastSetResponse = response.json();
    let last = last.last_set.unwrap();
    assert_eq!(last.set_number, 2);
    assert!((last.weight - 55.0).abs() < f64::EPSILON);

    let response = AxumTestRequest::get("/api/workout-sets/count?session_id=s1&exercise_name=Row")
        .send(router.clone())
        .await;
    let count: SetCountResponse = response.json();
    assert_eq!(count.count, 2);

    let response = AxumTestRequest::get("/api/workout-sets/count?session_id=s1")
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_sets_lists_in_log_order() {
    let router = setup().await;

    for exercise in ["Bench Press", "Incline Press", "Bench Press"] {
        log(
            &router,
            json!({ "session_id": "s9", "exercise_name": exercise, "weight": 40.0, "reps": 10 }),
        )
        .await;
    }

    let response = AxumTestRequest::get("/api/workout-sets/session/s9")
        .send(router)
        .await;
    let sets: Vec<WorkoutSetView> = response.json();
    let order: Vec<_> = sets
        .iter()
        .map(|s| (s.exercise_name.as_str(), s.set_number))
        .collect();
    assert_eq!(
        order,
        [("Bench Press", 1), ("Incline Press", 1), ("Bench Press", 2)]
    );
}

#[tokio::test]
async fn test_log_set_rejects_mistyped_fields_as_invalid_input() {
    let router = setup().await;

    for body in [
        json!({ "session_id": "s1", "exercise_name": "Squat", "weight": "60", "reps": 5 }),
        json!({ "session_id": "s1", "exercise_name": "Squat", "weight": 60.0, "reps": 10.5 }),
    ] {
        let response = log(&router, body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert!(error.error.starts_with("Invalid request body"));
    }

    let response = AxumTestRequest::get("/api/workout-sets/count?session_id=s1&exercise_name=Squat")
        .send(router)
        .await;
    let count: SetCountResponse = response.json();
    assert_eq!(count.count, 0);
}
