// ABOUTME: Integration tests for the session type and exercise catalog
// ABOUTME: Covers seeded lookups, catalog replacement, exercise routes and the health probe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::create_test_resources;
use evergain_server::database_plugins::DatabaseProvider;
use evergain_server::models::{CatalogExercise, SessionType};
use evergain_server::routes::health::HealthResponse;
use evergain_server::server::Server;
use helpers::axum_test::AxumTestRequest;

#[tokio::test]
async fn test_seeded_catalog_is_available() {
    let resources = create_test_resources().await.unwrap();
    let catalog = resources.catalog();

    assert!(catalog.is_valid_session_type("Push").await.unwrap());
    assert!(!catalog.is_valid_session_type("push").await.unwrap());

    let types = catalog.session_types().await.unwrap();
    assert_eq!(types.len(), 31);

    let exercises = catalog.exercises().await.unwrap();
    assert!(exercises.iter().any(|e| e.name == "Bench Press"));

    let groups = catalog.muscle_groups().await.unwrap();
    let mut sorted = groups.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(groups, sorted);
    assert!(groups.iter().any(|g| g == "Chest"));
}

#[tokio::test]
async fn test_exercises_for_session_filters_by_tag() {
    let resources = create_test_resources().await.unwrap();
    let catalog = resources.catalog();

    let legs = catalog.exercises_for_session("Legs").await.unwrap();
    assert!(!legs.is_empty());
    assert!(legs.iter().all(|e| e.is_tagged("Legs")));
    assert!(!legs.iter().any(|e| e.name == "Bench Press"));

    assert!(catalog.exercises_for_session("Unknown").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_replace_catalog_swaps_all_entries() {
    let resources = create_test_resources().await.unwrap();

    let types = vec![
        SessionType {
            name: "Mobility".to_owned(),
            description: "Joints and range".to_owned(),
            category: "Recovery".to_owned(),
        },
        SessionType {
            name: "Sprint".to_owned(),
            description: "Short intervals".to_owned(),
            category: "Conditioning".to_owned(),
        },
    ];
    let exercises = vec![CatalogExercise {
        name: "Hip Circle".to_owned(),
        muscle_group: "Hips".to_owned(),
        secondary: String::new(),
        sessions: vec!["Mobility".to_owned()],
    }];
    resources
        .database
        .replace_catalog(&types, &exercises)
        .await
        .unwrap();

    let catalog = resources.catalog();
    assert_eq!(catalog.session_types().await.unwrap(), types);
    assert!(!catalog.is_valid_session_type("Push").await.unwrap());
    assert_eq!(catalog.exercises_for_session("Mobility").await.unwrap(), exercises);

    let grouped = catalog.session_types_by_category().await.unwrap();
    let categories: Vec<_> = grouped.keys().cloned().collect();
    assert_eq!(categories, ["Conditioning", "Recovery"]);
}

#[tokio::test]
async fn test_exercise_routes() {
    let resources = create_test_resources().await.unwrap();
    let router = Server::router(&resources);

    let response = AxumTestRequest::get("/api/exercises").send(router.clone()).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let exercises: Vec<CatalogExercise> = response.json();
    assert!(!exercises.is_empty());

    let response = AxumTestRequest::get("/api/exercises/muscle-groups")
        .send(router)
        .await;
    let groups: Vec<String> = response.json();
    assert!(groups.iter().any(|g| g == "Back"));
}

#[tokio::test]
async fn test_health_reports_connected_store() {
    let resources = create_test_resources().await.unwrap();
    let router = Server::router(&resources);

    for path in ["/", "/api/health"] {
        let response = AxumTestRequest::get(path).send(router.clone()).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let health: HealthResponse = response.json();
        assert_eq!(health.status, "running");
        assert_eq!(health.database, "connected");
        assert_eq!(health.message, "EverGain Backend is running!");
    }
}
