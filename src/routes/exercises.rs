// ABOUTME: Route handlers for browsing the exercise catalog
// ABOUTME: Lists every exercise and the distinct primary muscle groups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::errors::AppError;
use crate::models::CatalogExercise;
use crate::resources::ServerResources;

/// Exercise catalog route handlers
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/exercises", get(Self::handle_list))
            .route(
                "/api/exercises/muscle-groups",
                get(Self::handle_muscle_groups),
            )
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Json<Vec<CatalogExercise>>, AppError> {
        Ok(Json(resources.catalog().exercises().await?))
    }

    async fn handle_muscle_groups(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Json<Vec<String>>, AppError> {
        Ok(Json(resources.catalog().muscle_groups().await?))
    }
}
