// ABOUTME: Domain services sitting between HTTP handlers and the store
// ABOUTME: Session lifecycle, set aggregation, set logging, catalog lookup and workout feedback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

/// Running and exact session totals
pub mod aggregator;
/// Session type and exercise lookups
pub mod catalog;
/// Start/end transitions and session reads
pub mod session_lifecycle;
/// Append-only set log access
pub mod set_log;
/// Standalone workout submissions with AI feedback
pub mod workouts;

pub use aggregator::{fold_sets, running_totals_drifted, SessionAggregator};
pub use catalog::CatalogLookup;
pub use session_lifecycle::SessionLifecycleManager;
pub use set_log::SetLogStore;
pub use workouts::WorkoutService;
