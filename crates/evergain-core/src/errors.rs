// ABOUTME: Unified error type with standard error codes and HTTP status mapping
// ABOUTME: Client-correctable failures surface their message, server failures stay opaque
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

//! Unified error handling
//!
//! Every fallible operation in EverGain returns [`AppResult`]. The
//! [`ErrorCode`] decides the HTTP status; the message is shown to the client
//! only for 4xx codes. 5xx errors are logged with full context and replaced
//! by a generic description in the response body.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used across the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Request field has an invalid value
    InvalidInput,
    /// A required request field is absent
    MissingRequiredField,
    /// Request body could not be parsed
    InvalidFormat,
    /// Referenced resource does not exist (or is not in the expected state)
    ResourceNotFound,
    /// Request conflicts with the current state of a resource
    ResourceConflict,
    /// No credentials supplied where they are required
    AuthRequired,
    /// Supplied credentials are invalid
    AuthInvalid,
    /// Supplied token has expired
    AuthExpired,
    /// Persistence layer failure
    DatabaseError,
    /// Upstream service (AI provider) failure
    ExternalServiceError,
    /// Invalid server configuration
    ConfigError,
    /// Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::InvalidFormat => 400,
            Self::AuthRequired | Self::AuthInvalid | Self::AuthExpired => 401,
            Self::ResourceNotFound => 404,
            Self::ResourceConflict => 409,
            Self::ExternalServiceError => 502,
            Self::DatabaseError | Self::ConfigError | Self::InternalError => 500,
        }
    }

    /// Generic description safe to show to any client
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input",
            Self::MissingRequiredField => "Missing required field",
            Self::InvalidFormat => "Invalid request format",
            Self::ResourceNotFound => "Resource not found",
            Self::ResourceConflict => "Resource conflict",
            Self::AuthRequired => "Authentication required",
            Self::AuthInvalid => "Invalid credentials",
            Self::AuthExpired => "Authentication expired",
            Self::DatabaseError | Self::ConfigError | Self::InternalError => {
                "Internal server error"
            }
            Self::ExternalServiceError => "Upstream service unavailable",
        }
    }

    /// Whether the caller can correct the request and retry
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        self.http_status() < 500
    }

    /// Stable snake_case identifier used in response bodies
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::MissingRequiredField => "missing_required_field",
            Self::InvalidFormat => "invalid_format",
            Self::ResourceNotFound => "resource_not_found",
            Self::ResourceConflict => "resource_conflict",
            Self::AuthRequired => "auth_required",
            Self::AuthInvalid => "auth_invalid",
            Self::AuthExpired => "auth_expired",
            Self::DatabaseError => "database_error",
            Self::ExternalServiceError => "external_service_error",
            Self::ConfigError => "config_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error carrying a code and a human-readable message
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct AppError {
    /// Error classification
    pub code: ErrorCode,
    /// Detail message (shown to clients only for 4xx codes)
    pub message: String,
}

/// Result alias used throughout EverGain
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create an error with an explicit code
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Validation failure (400)
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing required field (400)
    pub fn missing_field(field: &str) -> Self {
        Self::new(ErrorCode::MissingRequiredField, format!("{field} is required"))
    }

    /// Resource not found (404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, message)
    }

    /// State conflict (409)
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceConflict, message)
    }

    /// Missing or rejected credentials (401)
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Store failure (500)
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration failure (500)
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Upstream service failure
    pub fn external_service(service: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{service}: {}", message.into()),
        )
    }

    /// Unexpected internal failure (500)
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Message that may be shown to the client
    #[must_use]
    pub fn client_message(&self) -> &str {
        if self.code.is_client_error() {
            &self.message
        } else {
            self.code.description()
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::internal(format!("JSON serialization error: {error}"))
    }
}

/// Error body returned by the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable error code
    pub code: ErrorCode,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: error.client_message().to_owned(),
            code: error.code,
        }
    }
}

#[cfg(feature = "http-response")]
mod http_response {
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;
    use tracing::{error, warn};

    use super::{AppError, ErrorResponse};

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() {
                error!(code = %self.code, error = %self.message, "Request failed");
            } else {
                warn!(code = %self.code, error = %self.message, "Request rejected");
            }
            (status, Json(ErrorResponse::from(&self))).into_response()
        }
    }
}
