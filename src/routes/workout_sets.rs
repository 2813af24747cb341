// ABOUTME: Route handlers for logging workout sets and querying the set log
// ABOUTME: Logging validates the set, appends it and feeds the running session totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{required_param, JsonBody};
use crate::errors::AppError;
use crate::formatters::WorkoutSetView;
use crate::models::NewWorkoutSet;
use crate::resources::ServerResources;

/// Request to log a set
#[derive(Debug, Deserialize)]
pub struct LogSetRequest {
    /// Target session
    pub session_id: Option<String>,
    /// Exercise name
    pub exercise_name: Option<String>,
    /// Weight lifted (> 0)
    pub weight: Option<f64>,
    /// Repetitions (> 0)
    pub reps: Option<i64>,
    /// Rate of perceived exertion (1-10)
    pub rpe: Option<i64>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl LogSetRequest {
    fn into_new_set(self) -> Result<NewWorkoutSet, AppError> {
        let session_id = required_param(self.session_id.as_deref(), "session_id")?;
        let exercise_name = required_param(self.exercise_name.as_deref(), "exercise_name")?;
        let weight = self.weight.ok_or_else(|| AppError::missing_field("weight"))?;
        let reps = self.reps.ok_or_else(|| AppError::missing_field("reps"))?;
        NewWorkoutSet::new(
            &session_id,
            &exercise_name,
            weight,
            reps,
            self.rpe,
            self.notes,
        )
    }
}

/// Query naming a session and exercise
#[derive(Debug, Deserialize)]
pub struct SetLookupQuery {
    /// Session to look in
    pub session_id: Option<String>,
    /// Exercise to look for
    pub exercise_name: Option<String>,
}

impl SetLookupQuery {
    fn required(&self) -> Result<(String, String), AppError> {
        Ok((
            required_param(self.session_id.as_deref(), "session_id")?,
            required_param(self.exercise_name.as_deref(), "exercise_name")?,
        ))
    }
}

/// Last set lookup response
#[derive(Debug, Serialize, Deserialize)]
pub struct LastSetResponse {
    /// Most recent set, `null` when none was logged
    pub last_set: Option<WorkoutSetView>,
}

/// Set count response
#[derive(Debug, Serialize, Deserialize)]
pub struct SetCountResponse {
    /// Number of sets logged
    pub count: u32,
}

/// Workout set route handlers
pub struct WorkoutSetRoutes;

impl WorkoutSetRoutes {
    /// Create all workout set routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workout-sets/log", post(Self::handle_log))
            .route(
                "/api/workout-sets/session/:id",
                get(Self::handle_session_sets),
            )
            .route("/api/workout-sets/last-set", get(Self::handle_last_set))
            .route("/api/workout-sets/count", get(Self::handle_count))
            .with_state(resources)
    }

    async fn handle_log(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<LogSetRequest>,
    ) -> Result<Response, AppError> {
        let new_set = request.into_new_set()?;
        let stored = resources
            .set_log()
            .log_set(&resources.aggregator(), &new_set)
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(WorkoutSetView::render(&stored, resources.display_offset())),
        )
            .into_response())
    }

    async fn handle_session_sets(
        State(resources): State<Arc<ServerResources>>,
        Path(session_id): Path<String>,
    ) -> Result<Json<Vec<WorkoutSetView>>, AppError> {
        let sets = resources.set_log().list_for_session(&session_id).await?;
        Ok(Json(WorkoutSetView::render_all(
            &sets,
            resources.display_offset(),
        )))
    }

    async fn handle_last_set(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<SetLookupQuery>,
    ) -> Result<Json<LastSetResponse>, AppError> {
        let (session_id, exercise_name) = query.required()?;
        let last = resources
            .set_log()
            .last_for(&session_id, &exercise_name)
            .await?;

        Ok(Json(LastSetResponse {
            last_set: last
                .as_ref()
                .map(|set| WorkoutSetView::render(set, resources.display_offset())),
        }))
    }

    async fn handle_count(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<SetLookupQuery>,
    ) -> Result<Json<SetCountResponse>, AppError> {
        let (session_id, exercise_name) = query.required()?;
        let count = resources
            .set_log()
            .count_for(&session_id, &exercise_name)
            .await?;
        Ok(Json(SetCountResponse { count }))
    }
}
