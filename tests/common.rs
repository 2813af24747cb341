// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory store, server resources, and catalog fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `evergain_server`

use std::{
    env,
    sync::{Arc, Once},
};

use anyhow::Result;
use evergain_server::{
    config::ServerConfig,
    database_plugins::factory::Database,
    llm::FeedbackAdvisor,
    models::NewWorkoutSet,
    resources::ServerResources,
};

static INIT_LOGGER: Once = Once::new();

pub const TEST_JWT_SECRET: &str = "test_jwt_secret_for_integration_tests";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh in-memory store with migrations and the default catalog applied
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.jwt_secret = TEST_JWT_SECRET.to_owned();
    config
}

/// Server resources over a fresh store with no feedback advisor
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    create_test_resources_with_advisor(None).await
}

pub async fn create_test_resources_with_advisor(
    advisor: Option<Arc<dyn FeedbackAdvisor>>,
) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database,
        test_config(),
        advisor,
    )))
}

pub fn new_set(session_id: &str, exercise: &str, weight: f64, reps: i64) -> NewWorkoutSet {
    NewWorkoutSet::new(session_id, exercise, weight, reps, None, None).unwrap()
}
