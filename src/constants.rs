// ABOUTME: Shared constants for defaults, limits and fallback feedback
// ABOUTME: Centralises magic values used across routes, services and config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

/// Service identity reported by the health endpoint
pub mod service {
    /// Human readable service name
    pub const NAME: &str = "EverGain";
    /// Version reported to clients
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    /// Message returned while the server is up
    pub const RUNNING_MESSAGE: &str = "EverGain Backend is running!";
}

/// Configuration defaults applied when an environment variable is unset
pub mod defaults {
    /// HTTP listen port
    pub const HTTP_PORT: u16 = 8080;
    /// Listen address
    pub const HOST: &str = "0.0.0.0";
    /// Store location
    pub const DATABASE_URL: &str = "sqlite:./data/evergain.db";
    /// JWT lifetime
    pub const JWT_EXPIRY_HOURS: i64 = 72;
    /// Gemini model name
    pub const GEMINI_MODEL: &str = "gemini-pro";
    /// Gemini REST endpoint
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Offset applied to instants rendered for clients (WIB)
    pub const DISPLAY_UTC_OFFSET_HOURS: i32 = 7;
    /// Per-request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Outbound LLM call timeout
    pub const LLM_TIMEOUT_SECS: u64 = 20;
    /// Development-only signing secret used when `JWT_SECRET` is unset
    pub const DEV_JWT_SECRET: &str = "evergain-dev-secret-change-me";
}

/// Bounds on list endpoints and request sizes
pub mod limits {
    /// Session history page size when the client gives none
    pub const DEFAULT_HISTORY_LIMIT: u32 = 20;
    /// Largest session history page
    pub const MAX_HISTORY_LIMIT: u32 = 100;
    /// Workouts returned by the workout list endpoint
    pub const WORKOUT_LIST_LIMIT: u32 = 20;
    /// Recent workouts passed to the advisor as context
    pub const ADVISOR_HISTORY: u32 = 5;
    /// Minimum password length at registration
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    /// Minimum full name length at registration
    pub const MIN_FULL_NAME_LENGTH: usize = 2;
    /// Largest accepted request body
    pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;
}

/// Feedback used when the advisor cannot produce a verdict
pub mod fallback {
    /// Advice shown when feedback generation fails
    pub const ADVICE: &str = "Recorded. Keep pushing!";
    /// Neutral display color
    pub const COLOR: &str = "#E0E0E0";
    /// Unknown risk
    pub const RISK: &str = "unknown";
}

/// Verdict display colors
pub mod colors {
    /// Lime, progressive overload
    pub const PROGRESS: &str = "#C6FF5E";
    /// Electric blue, stagnant or neutral
    pub const STAGNANT: &str = "#00D1FF";
    /// Red, unsafe or decline
    pub const UNSAFE: &str = "#FF5E5E";
}
