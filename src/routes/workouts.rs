// ABOUTME: Route handlers for standalone workout submissions with AI feedback
// ABOUTME: POST stores a submission with its verdict, GET lists the most recent ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::formatters::WorkoutView;
use crate::models::WorkoutSubmission;
use crate::resources::ServerResources;
use crate::routes::JsonBody;

/// Workout submission body
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    /// Weight lifted
    pub weight: Option<f64>,
    /// Reps per set
    pub reps: Option<i64>,
    /// Number of sets
    pub sets: Option<i64>,
    /// Free-text feeling
    pub feeling: Option<String>,
}

/// Workout route handlers
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/workouts",
                get(Self::handle_list).post(Self::handle_create),
            )
            .with_state(resources)
    }

    #[tracing::instrument(skip(resources, request), fields(route = "create_workout"))]
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<CreateWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let submission = WorkoutSubmission::new(
            request.weight.ok_or_else(|| AppError::missing_field("weight"))?,
            request.reps.ok_or_else(|| AppError::missing_field("reps"))?,
            request.sets.ok_or_else(|| AppError::missing_field("sets"))?,
            request.feeling,
        )?;

        let workout = resources.workouts().submit(submission).await?;
        Ok((
            StatusCode::CREATED,
            Json(WorkoutView::render(&workout, resources.display_offset())),
        )
            .into_response())
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Json<Vec<WorkoutView>>, AppError> {
        let workouts = resources.workouts().list_recent().await?;
        let offset = resources.display_offset();
        Ok(Json(
            workouts
                .iter()
                .map(|workout| WorkoutView::render(workout, offset))
                .collect(),
        ))
    }
}
