// ABOUTME: Health probe routes reporting service identity and store availability
// ABOUTME: Always answers 200 so a degraded store is visible without failing the probe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::service;
use crate::database_plugins::DatabaseProvider;
use crate::resources::ServerResources;

/// Health probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `running`, or `degraded` when the store is unreachable
    pub status: String,
    /// Human readable status message
    pub message: String,
    /// Server version
    pub version: String,
    /// `connected` or `unavailable`
    pub database: String,
}

/// Health route handlers
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create health routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_health))
            .route("/api/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<HealthResponse> {
        let database_ok = match resources.database.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Health check: database unavailable");
                false
            }
        };

        Json(HealthResponse {
            status: if database_ok { "running" } else { "degraded" }.to_owned(),
            message: service::RUNNING_MESSAGE.to_owned(),
            version: service::VERSION.to_owned(),
            database: if database_ok { "connected" } else { "unavailable" }.to_owned(),
        })
    }
}
