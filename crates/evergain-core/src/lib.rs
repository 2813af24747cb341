// ABOUTME: Core crate for EverGain shared between the server and its tooling
// ABOUTME: Exposes the unified error type and the session, set, catalog and workout models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

#![deny(unsafe_code)]

//! # EverGain Core
//!
//! Domain models and the unified error type. Nothing in this crate touches the
//! store or the network; the server crate builds on these types.

/// Unified error handling with standard error codes
pub mod errors;

/// Domain models: sessions, workout sets, catalog entries and workouts
pub mod models;
