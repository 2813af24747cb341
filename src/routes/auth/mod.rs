// ABOUTME: User authentication route handlers for registration and login
// ABOUTME: Issues JWTs consumed by the session endpoints for identity resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

//! Authentication routes
//!
//! Handlers are thin wrappers that delegate to [`AuthService`].
//!
//! ## Module Structure
//! - `types` - Request/response DTOs for auth endpoints

mod types;

pub use types::{AuthResponse, LoginRequest, RegisterRequest};

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{info, warn};

use crate::auth::{hash_password, verify_password, AuthManager};
use crate::constants::limits;
use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::errors::{AppError, AppResult};
use crate::models::{User, UserProfile};
use crate::resources::ServerResources;
use crate::routes::JsonBody;

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    database: Arc<Database>,
    auth_manager: AuthManager,
}

impl AuthService {
    /// Creates a new authentication service
    #[must_use]
    pub const fn new(database: Arc<Database>, auth_manager: AuthManager) -> Self {
        Self {
            database,
            auth_manager,
        }
    }

    /// Register a new user and issue a token
    ///
    /// # Errors
    ///
    /// - `InvalidInput` listing every failed field check
    /// - `ResourceConflict` if the email is already registered
    /// - `DatabaseError`/`InternalError` on store or hashing failures
    #[tracing::instrument(skip(self, request), fields(route = "register"))]
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        let email = request.email.trim().to_owned();
        let full_name = request.full_name.trim().to_owned();

        let errors = Self::registration_errors(&email, &request.password, &full_name);
        if !errors.is_empty() {
            return Err(AppError::invalid_input(errors.join(", ")));
        }

        if self.database.get_user_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = hash_password(request.password).await?;
        let user = User::new(email, password_hash, full_name);
        // Unique email index catches a concurrent registration that slipped past the check
        self.database.create_user(&user).await?;

        info!(user_id = %user.id, "New user registered");
        self.issue(&user)
    }

    /// Verify credentials and issue a token
    ///
    /// # Errors
    ///
    /// `AuthInvalid` if email or password is missing, the email is unknown or
    /// the password does not match
    #[tracing::instrument(skip(self, request), fields(route = "login"))]
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let email = request.email.trim();
        let mut errors = Vec::new();
        if email.is_empty() {
            errors.push("Email is required");
        }
        if request.password.is_empty() {
            errors.push("Password is required");
        }
        if !errors.is_empty() {
            return Err(AppError::auth_invalid(errors.join(", ")));
        }

        let Some(user) = self.database.get_user_by_email(email).await? else {
            warn!("Login attempt for unknown email");
            return Err(AppError::auth_invalid("Invalid credentials"));
        };

        if !verify_password(request.password, user.password_hash.clone()).await? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::auth_invalid("Invalid credentials"));
        }

        info!(user_id = %user.id, "User logged in");
        self.issue(&user)
    }

    fn issue(&self, user: &User) -> AppResult<AuthResponse> {
        Ok(AuthResponse {
            token: self.auth_manager.generate_token(user)?,
            user: UserProfile::from(user),
        })
    }

    /// Field checks for registration, one message per failure
    #[must_use]
    pub fn registration_errors(email: &str, password: &str, full_name: &str) -> Vec<&'static str> {
        let mut errors = Vec::new();
        if !email.contains('@') {
            errors.push("Valid email is required");
        }
        if password.chars().count() < limits::MIN_PASSWORD_LENGTH {
            errors.push("Password must be at least 6 characters");
        }
        if full_name.chars().count() < limits::MIN_FULL_NAME_LENGTH {
            errors.push("Full name is required");
        }
        errors
    }
}

/// Authentication route handlers
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    fn service(resources: &ServerResources) -> AuthService {
        AuthService::new(resources.database.clone(), resources.auth_manager.clone())
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let response = Self::service(&resources).register(request).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<LoginRequest>,
    ) -> Result<Json<AuthResponse>, AppError> {
        Ok(Json(Self::service(&resources).login(request).await?))
    }
}
