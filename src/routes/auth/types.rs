// ABOUTME: Request and response types for authentication routes
// ABOUTME: Defines DTOs for registration and login
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use serde::{Deserialize, Serialize};

use crate::models::UserProfile;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Display name (at least 2 characters)
    #[serde(default)]
    pub full_name: String,
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Password (at least 6 characters, will be hashed)
    #[serde(default)]
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Password
    #[serde(default)]
    pub password: String,
}

/// Successful registration or login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// The authenticated user
    pub user: UserProfile,
}
