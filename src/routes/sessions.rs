// ABOUTME: Route handlers for workout session lifecycle and session catalog lookups
// ABOUTME: Start/end sessions, read active session and history, list types and exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

//! Session routes
//!
//! Identity comes from a Bearer token when present, otherwise from the
//! `user_id` in the body or query string.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{required_param, resolve_user_id, JsonBody};
use crate::errors::{AppError, ErrorCode};
use crate::formatters::{SessionView, WorkoutSetView};
use crate::models::{CatalogExercise, SessionType};
use crate::resources::ServerResources;

/// Request to start a session
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// Acting user when no token is sent
    pub user_id: Option<String>,
    /// Catalog session type
    pub session_type: Option<String>,
}

/// Request to end the active session
#[derive(Debug, Default, Deserialize)]
pub struct EndSessionRequest {
    /// Acting user when no token is sent
    pub user_id: Option<String>,
}

/// Query identifying the acting user
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    /// Acting user when no token is sent
    pub user_id: Option<String>,
}

/// Query for session history
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Acting user when no token is sent
    pub user_id: Option<String>,
    /// Page size (default 20, clamped to 1..=100)
    pub limit: Option<u32>,
}

/// Query for exercises by session type
#[derive(Debug, Deserialize)]
pub struct ExercisesQuery {
    /// Session type tag to filter by
    pub session_type: Option<String>,
}

/// Active session lookup response
#[derive(Debug, Serialize, Deserialize)]
pub struct ActiveSessionResponse {
    /// Whether the user has an active session
    pub active: bool,
    /// The active session, if any
    pub session: Option<SessionView>,
}

/// Session route handlers
pub struct SessionRoutes;

impl SessionRoutes {
    /// Create all session routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/sessions/start", post(Self::handle_start))
            .route("/api/sessions/end", post(Self::handle_end))
            .route("/api/sessions/active", get(Self::handle_active))
            .route("/api/sessions/history", get(Self::handle_history))
            .route("/api/sessions/types", get(Self::handle_types))
            .route(
                "/api/sessions/types/categorized",
                get(Self::handle_types_categorized),
            )
            .route("/api/sessions/exercises", get(Self::handle_exercises))
            .route(
                "/api/sessions/:id/workout-sets",
                get(Self::handle_session_sets),
            )
            .with_state(resources)
    }

    async fn handle_start(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        JsonBody(request): JsonBody<StartSessionRequest>,
    ) -> Result<Response, AppError> {
        let user_id = resolve_user_id(&resources, &headers, request.user_id.as_deref())?;
        let session_type = required_param(request.session_type.as_deref(), "session_type")?;

        let session = resources
            .session_lifecycle()
            .start(&user_id, &session_type)
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(SessionView::render(&session, resources.display_offset())),
        )
            .into_response())
    }

    /// A missing active session is reported as a bad request on this endpoint
    async fn handle_end(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        request: Option<Json<EndSessionRequest>>,
    ) -> Result<Response, AppError> {
        let request = request.map(|Json(body)| body).unwrap_or_default();
        let user_id = resolve_user_id(&resources, &headers, request.user_id.as_deref())?;

        let session = resources
            .session_lifecycle()
            .end(&user_id)
            .await
            .map_err(|e| match e.code {
                ErrorCode::ResourceNotFound => AppError::invalid_input(e.message),
                _ => e,
            })?;

        info!(
            user_id = %user_id,
            duration_minutes = session.duration_minutes(),
            "Session ended via API"
        );
        Ok(Json(SessionView::render(&session, resources.display_offset())).into_response())
    }

    async fn handle_active(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<UserQuery>,
    ) -> Result<Json<ActiveSessionResponse>, AppError> {
        let user_id = resolve_user_id(&resources, &headers, query.user_id.as_deref())?;
        let session = resources.session_lifecycle().get_active(&user_id).await?;

        Ok(Json(ActiveSessionResponse {
            active: session.is_some(),
            session: session
                .as_ref()
                .map(|s| SessionView::render(s, resources.display_offset())),
        }))
    }

    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<HistoryQuery>,
    ) -> Result<Json<Vec<SessionView>>, AppError> {
        let user_id = resolve_user_id(&resources, &headers, query.user_id.as_deref())?;
        let sessions = resources
            .session_lifecycle()
            .get_history(&user_id, query.limit)
            .await?;

        let offset = resources.display_offset();
        Ok(Json(
            sessions
                .iter()
                .map(|session| SessionView::render(session, offset))
                .collect(),
        ))
    }

    async fn handle_types(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Json<Vec<SessionType>>, AppError> {
        Ok(Json(resources.catalog().session_types().await?))
    }

    async fn handle_types_categorized(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Json<BTreeMap<String, Vec<SessionType>>>, AppError> {
        Ok(Json(resources.catalog().session_types_by_category().await?))
    }

    async fn handle_exercises(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ExercisesQuery>,
    ) -> Result<Json<Vec<CatalogExercise>>, AppError> {
        let session_type = required_param(query.session_type.as_deref(), "session_type")?;
        Ok(Json(
            resources
                .catalog()
                .exercises_for_session(&session_type)
                .await?,
        ))
    }

    /// Unknown sessions yield an empty list
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
}
