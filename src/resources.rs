// ABOUTME: Shared server resources injected into every route handler
// ABOUTME: Holds the store handle, configuration, token manager and optional feedback advisor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use std::sync::Arc;

use chrono::FixedOffset;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database_plugins::factory::Database;
use crate::errors::AppResult;
use crate::llm::{FeedbackAdvisor, GeminiAdvisor, GeminiConfig};
use crate::services::{
    CatalogLookup, SessionAggregator, SessionLifecycleManager, SetLogStore, WorkoutService,
};

/// Resources shared by all requests
///
/// Handlers are stateless; everything they need is reachable from here and
/// no lock is held across requests.
#[derive(Clone)]
pub struct ServerResources {
    /// Store handle
    pub database: Arc<Database>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Token issuance and validation
    pub auth_manager: AuthManager,
    /// Feedback advisor; `None` means fallback feedback only
    pub advisor: Option<Arc<dyn FeedbackAdvisor>>,
}

impl ServerResources {
    /// Assemble resources from explicit parts
    #[must_use]
    pub fn new(
        database: Database,
        config: ServerConfig,
        advisor: Option<Arc<dyn FeedbackAdvisor>>,
    ) -> Self {
        let auth_manager = AuthManager::from_config(&config.auth);
        Self {
            database: Arc::new(database),
            config: Arc::new(config),
            auth_manager,
            advisor,
        }
    }

    /// Assemble resources, building the Gemini advisor when an API key is configured
    ///
    /// # Errors
    ///
    /// Returns an error if the advisor HTTP client cannot be built
    pub fn from_config(database: Database, config: ServerConfig) -> AppResult<Self> {
        let advisor = GeminiConfig::from_llm_config(&config.llm)
            .map(GeminiAdvisor::new)
            .transpose()?
            .map(|advisor| Arc::new(advisor) as Arc<dyn FeedbackAdvisor>);
        if advisor.is_none() {
            tracing::warn!("GEMINI_API_KEY not set, workout feedback will use the fallback verdict");
        }
        Ok(Self::new(database, config, advisor))
    }

    /// Offset used when rendering instants for clients
    #[must_use]
    pub fn display_offset(&self) -> FixedOffset {
        self.config.display_offset
    }

    /// Catalog lookups
    #[must_use]
    pub fn catalog(&self) -> CatalogLookup {
        CatalogLookup::new(self.database.clone())
    }

    /// Session aggregates
    #[must_use]
    pub fn aggregator(&self) -> SessionAggregator {
        SessionAggregator::new(self.database.clone())
    }

    /// Set log
    #[must_use]
    pub fn set_log(&self) -> SetLogStore {
        SetLogStore::new(self.database.clone())
    }

    /// Session lifecycle
    #[must_use]
    pub fn session_lifecycle(&self) -> SessionLifecycleManager {
        SessionLifecycleManager::new(self.database.clone(), self.catalog(), self.aggregator())
    }

    /// Workout submissions
    #[must_use]
    pub fn workouts(&self) -> WorkoutService {
        WorkoutService::new(self.database.clone(), self.advisor.clone())
    }
}
