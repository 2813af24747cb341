// ABOUTME: Session lifecycle: one active session per user, start and end transitions, reads
// ABOUTME: End folds the set log and finalizes with a compare-and-set write in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use std::sync::Arc;

use tracing::info;

use super::aggregator::{running_totals_drifted, SessionAggregator};
use super::catalog::CatalogLookup;
use crate::constants::limits;
use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::errors::{AppError, AppResult};
use crate::models::{stored_now, Session};

/// Clamp a requested history size to the allowed range
#[must_use]
pub fn clamp_history_limit(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(limits::DEFAULT_HISTORY_LIMIT)
        .clamp(1, limits::MAX_HISTORY_LIMIT)
}

/// Owns session state transitions
///
/// Active -> Ended is one-way. Every write is conditional in the store, so
/// concurrent starts produce one session and concurrent ends finalize once.
#[derive(Clone)]
pub struct SessionLifecycleManager {
    database: Arc<Database>,
    catalog: CatalogLookup,
    aggregator: SessionAggregator,
}

impl SessionLifecycleManager {
    /// Create a lifecycle manager
    #[must_use]
    pub const fn new(
        database: Arc<Database>,
        catalog: CatalogLookup,
        aggregator: SessionAggregator,
    ) -> Self {
        Self {
            database,
            catalog,
            aggregator,
        }
    }

    /// Start a session for the user
    ///
    /// # Errors
    ///
    /// - `ResourceConflict` if the user already has an active session
    /// - `InvalidInput` if the session type is not in the catalog
    /// - `DatabaseError` if the store fails
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn start(&self, user_id: &str, session_type: &str) -> AppResult<Session> {
        if self.database.get_active_session(user_id).await?.is_some() {
            return Err(AppError::conflict("User already has an active session"));
        }

        if !self.catalog.is_valid_session_type(session_type).await? {
            return Err(AppError::invalid_input(format!(
                "Invalid session type: {session_type}"
            )));
        }

        let session = Session::new(user_id, session_type);
        // A racing start that passed the check above loses here on the unique index
        self.database.create_session(&session).await?;

        info!(session_id = %session.id, session_type = %session_type, "Session started");
        Ok(session)
    }

    /// End the user's active session with exact totals
    ///
    /// # Errors
    ///
    /// - `ResourceNotFound` if the user has no active session, or another
    ///   request ended it first
    /// - `DatabaseError` if the store fails
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn end(&self, user_id: &str) -> AppResult<Session> {
        let mut session = self
            .database
            .get_active_session(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("No active session found"))?;
        let session_id = session.id.to_string();

        let ended_at = stored_now();
        let totals = self
            .aggregator
            .finalize_exact(&session_id, ended_at)
            .await?
            .ok_or_else(|| AppError::not_found("No active session found"))?;
        running_totals_drifted(&session, &totals);

        session.finalize(ended_at, totals);
        info!(
            session_id = %session_id,
            total_sets = session.total_sets,
            total_volume = session.total_volume,
            "Session ended"
        );
        Ok(session)
    }

    /// The user's active session, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn get_active(&self, user_id: &str) -> AppResult<Option<Session>> {
        self.database.get_active_session(user_id).await
    }

    /// The user's sessions, most recent start first
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn get_history(&self, user_id: &str, limit: Option<u32>) -> AppResult<Vec<Session>> {
        self.database
            .list_sessions(user_id, clamp_history_limit(limit))
            .await
    }
}
