// ABOUTME: Route module organization for EverGain HTTP endpoints
// ABOUTME: Each domain module defines its routes and thin handlers delegating to services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

//! Route module for the EverGain server
//!
//! All endpoints live under `/api` (plus `/` for the health probe). Handlers
//! validate request bodies into typed values, call a service, and render the
//! result through the views in [`crate::formatters`].

/// Registration and login
pub mod auth;
/// Exercise catalog listing
pub mod exercises;
/// Health probe
pub mod health;
/// Session lifecycle endpoints
pub mod sessions;
/// Workout set logging endpoints
pub mod workout_sets;
/// Standalone workout submissions
pub mod workouts;

pub use auth::AuthRoutes;
pub use exercises::ExerciseRoutes;
pub use health::HealthRoutes;
pub use sessions::SessionRoutes;
pub use workout_sets::WorkoutSetRoutes;
pub use workouts::WorkoutRoutes;

use axum::{
    extract::{FromRequest, Request},
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;

use crate::auth::extract_bearer_token;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;

/// Resolve the acting user for a request
///
/// A Bearer token wins and must be valid; otherwise the explicitly supplied
/// `user_id` is used. With neither, the request is rejected.
///
/// # Errors
///
/// - `AuthInvalid`/`AuthExpired` if an Authorization header is present but unusable
/// - `MissingRequiredField` if no identity was supplied at all
pub fn resolve_user_id(
    resources: &ServerResources,
    headers: &HeaderMap,
    supplied: Option<&str>,
) -> AppResult<String> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| AppError::auth_invalid("Invalid Authorization header"))?;
        let token = extract_bearer_token(value)
            .ok_or_else(|| AppError::auth_invalid("Invalid Authorization header format"))?;
        return Ok(resources.auth_manager.validate_token(token)?.sub);
    }

    required_param(supplied, "user_id")
}

/// Trim a required string parameter, rejecting missing or blank values
///
/// # Errors
///
/// Returns `MissingRequiredField` naming the parameter
pub fn required_param(value: Option<&str>, name: &str) -> AppResult<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| AppError::missing_field(name))
}

/// JSON request body whose rejections render as `INVALID_INPUT`
///
/// Wraps [`Json`] so a malformed body, a wrong field type or a missing
/// `Content-Type` answers 400 with the standard `{error, code}` payload.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
            })?;
        Ok(Self(value))
    }
}
