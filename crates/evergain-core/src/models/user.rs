// ABOUTME: User account model and its public profile projection
// ABOUTME: The password hash never leaves the server through the profile type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stored_now;

/// Stored user account
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Login email (unique)
    pub email: String,
    /// bcrypt password hash
    pub password_hash: String,
    /// Display name
    pub full_name: String,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier
    #[must_use]
    pub fn new(email: String, password_hash: String, full_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            full_name,
            created_at: stored_now(),
        }
    }
}

/// Public view of a user returned by the auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier
    pub id: String,
    /// Login email
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Account creation time (ISO 8601)
    pub created_at: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}
