// ABOUTME: Read-only catalog lookups for session types and exercises
// ABOUTME: Validates session types on start and groups them by category for clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::errors::AppResult;
use crate::models::{CatalogExercise, SessionType};

/// Catalog lookup service
#[derive(Clone)]
pub struct CatalogLookup {
    database: Arc<Database>,
}

impl CatalogLookup {
    /// Create a lookup over the given store
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Whether `name` is a known session type (exact, case-sensitive)
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn is_valid_session_type(&self, name: &str) -> AppResult<bool> {
        Ok(self.database.get_session_type(name).await?.is_some())
    }

    /// All session types in catalog order
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn session_types(&self) -> AppResult<Vec<SessionType>> {
        self.database.list_session_types().await
    }

    /// Session types grouped by category; categories sorted, types in catalog order
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn session_types_by_category(
        &self,
    ) -> AppResult<BTreeMap<String, Vec<SessionType>>> {
        Ok(group_by_category(self.session_types().await?))
    }

    /// Exercises tagged for a session type
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn exercises_for_session(&self, session_type: &str) -> AppResult<Vec<CatalogExercise>> {
        self.database.list_exercises_for_session(session_type).await
    }

    /// The full exercise list
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn exercises(&self) -> AppResult<Vec<CatalogExercise>> {
        self.database.list_exercises().await
    }

    /// Distinct primary muscle groups, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn muscle_groups(&self) -> AppResult<Vec<String>> {
        self.database.list_muscle_groups().await
    }
}

/// Group session types by category, preserving input order within a category
#[must_use]
pub fn group_by_category(types: Vec<SessionType>) -> BTreeMap<String, Vec<SessionType>> {
    let mut grouped: BTreeMap<String, Vec<SessionType>> = BTreeMap::new();
    for session_type in types {
        grouped
            .entry(session_type.category.clone())
            .or_default()
            .push(session_type);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_type(name: &str, category: &str) -> SessionType {
        SessionType {
            name: name.to_owned(),
            description: String::new(),
            category: category.to_owned(),
        }
    }

    #[test]
    fn grouping_keeps_order_within_category() {
        let grouped = group_by_category(vec![
            session_type("Push", "Split"),
            session_type("Rest", "Recovery"),
            session_type("Pull", "Split"),
        ]);
        assert_eq!(grouped.len(), 2);
        let split: Vec<_> = grouped["Split"].iter().map(|t| t.name.as_str()).collect();
        assert_eq!(split, ["Push", "Pull"]);
    }
}
