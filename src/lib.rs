// ABOUTME: Main library entry point for the EverGain workout tracking API
// ABOUTME: Wires session lifecycle, set logging, catalog lookup and AI feedback behind an axum server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

#![deny(unsafe_code)]

//! # EverGain Server
//!
//! A fitness tracking backend. Users start and end workout sessions, log
//! individual exercise sets inside a session, and submit standalone workouts
//! for AI coaching feedback.
//!
//! ## Architecture
//!
//! - **Set log**: append-only record of exercise sets keyed by session
//! - **Aggregator**: running totals while a session is active, exact fold at end
//! - **Session lifecycle**: one active session per user, start/end transitions
//! - **Catalog**: session types and exercises seeded by migration
//! - **Feedback advisor**: LLM wrapper used by the workout submission flow
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use evergain_server::config::ServerConfig;
//! use evergain_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("EverGain configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Password hashing and JWT issuance
pub mod auth;

/// Environment-driven server configuration
pub mod config;

/// Shared constants
pub mod constants;

/// `SQLite` storage managers and migrations
pub mod database;

/// Store handle abstraction with reconnect-on-use
pub mod database_plugins;

/// Error types re-exported from `evergain-core`
pub mod errors;

/// Display formatting for instants sent to clients
pub mod formatters;

/// LLM-backed workout feedback
pub mod llm;

/// Tracing subscriber setup
pub mod logging;

/// Domain models re-exported from `evergain-core`
pub mod models;

/// Shared server state injected into every handler
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// HTTP server assembly
pub mod server;

/// Domain services (set log, aggregation, lifecycle, catalog, workouts)
pub mod services;
