// ABOUTME: Integration tests for registration and login endpoints
// ABOUTME: Verifies validation messages, duplicate emails, credential checks and token use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use axum::{http::StatusCode, Router};
use common::create_test_resources;
use evergain_server::errors::{ErrorCode, ErrorResponse};
use evergain_server::formatters::SessionView;
use evergain_server::resources::ServerResources;
use evergain_server::routes::auth::AuthResponse;
use evergain_server::server::Server;
use helpers::axum_test::AxumTestRequest;
use serde_json::json;

async fn setup() -> (Arc<ServerResources>, Router) {
    let resources = create_test_resources().await.unwrap();
    let router = Server::router(&resources);
    (resources, router)
}

async fn register(router: &Router, email: &str) -> AuthResponse {
    let response = AxumTestRequest::post("/api/auth/register")
        .json(&json!({
            "full_name": "Test Lifter",
            "email": email,
            "password": "secret123"
        }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    response.json()
}

#[tokio::test]
async fn test_register_issues_valid_token() {
    let (resources, router) = setup().await;

    let auth = register(&router, "lifter@example.com").await;

    assert_eq!(auth.user.email, "lifter@example.com");
    assert_eq!(auth.user.full_name, "Test Lifter");
    let claims = resources.auth_manager.validate_token(&auth.token).unwrap();
    assert_eq!(claims.sub, auth.user.id);
    assert_eq!(claims.email, "lifter@example.com");
}

#[tokio::test]
async fn test_register_reports_every_invalid_field() {
    let (_, router) = setup().await;

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&json!({ "full_name": "A", "email": "nope", "password": "123" }))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = response.json();
    assert_eq!(
        error.error,
        "Valid email is required, Password must be at least 6 characters, Full name is required"
    );
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let (_, router) = setup().await;
    register(&router, "dup@example.com").await;

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&json!({
            "full_name": "Another Lifter",
            "email": "dup@example.com",
            "password": "secret456"
        }))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let error: ErrorResponse = response.json();
    assert_eq!(error.code, ErrorCode::ResourceConflict);
    assert_eq!(error.error, "Email already registered");
}

#[tokio::test]
async fn test_login_round_trip() {
    let (_, router) = setup().await;
    let registered = register(&router, "login@example.com").await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "login@example.com", "password": "secret123" }))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let auth: AuthResponse = response.json();
    assert_eq!(auth.user.id, registered.user.id);
    assert!(!auth.token.is_empty());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let (_, router) = setup().await;
    register(&router, "known@example.com").await;

    for body in [
        json!({ "email": "known@example.com", "password": "wrong-password" }),
        json!({ "email": "unknown@example.com", "password": "secret123" }),
    ] {
        let response = AxumTestRequest::post("/api/auth/login")
            .json(&body)
            .send(router.clone())
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        let error: ErrorResponse = response.json();
        assert_eq!(error.error, "Invalid credentials");
    }
}

#[tokio::test]
async fn test_login_requires_fields() {
    let (_, router) = setup().await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "Email is required, Password is required");
}

#[tokio::test]
async fn test_registered_token_starts_session() {
    let (_, router) = setup().await;
    let auth = register(&router, "session@example.com").await;

    let response = AxumTestRequest::post("/api/sessions/start")
        .header("authorization", &format!("Bearer {}", auth.token))
        .json(&json!({ "session_type": "Upper" }))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    let session: SessionView = response.json();
    assert_eq!(session.user_id, auth.user.id);
}

#[tokio::test]
async fn test_malformed_auth_bodies_are_invalid_input() {
    let (_, router) = setup().await;

    for (uri, body) in [
        ("/api/auth/register", json!({ "email": 42, "password": "secret1" })),
        ("/api/auth/login", json!(["not", "an", "object"])),
    ] {
        let response = AxumTestRequest::post(uri).json(&body).send(router.clone()).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert_eq!(error.code, ErrorCode::InvalidInput);
    }
}
