// ABOUTME: Read-only catalog entries for session types and exercises
// ABOUTME: Exercises carry the session tags they apply to
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use serde::{Deserialize, Serialize};

/// A recognised kind of workout session (e.g. "Push")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionType {
    /// Unique session type name
    pub name: String,
    /// Short description of the focus
    pub description: String,
    /// Grouping category (e.g. "Split", "Goal")
    pub category: String,
}

/// An exercise known to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogExercise {
    /// Unique exercise name
    pub name: String,
    /// Primary muscle group
    pub muscle_group: String,
    /// Secondary muscle group (may be empty)
    #[serde(default)]
    pub secondary: String,
    /// Session types this exercise is suitable for
    #[serde(default)]
    pub sessions: Vec<String>,
}

impl CatalogExercise {
    /// Whether this exercise is tagged for the given session type
    #[must_use]
    pub fn is_tagged(&self, session_type: &str) -> bool {
        self.sessions.iter().any(|s| s == session_type)
    }
}
