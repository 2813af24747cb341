// ABOUTME: Domain model surface for the server crate
// ABOUTME: Re-exports session, set, catalog, user and workout models from evergain-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

pub use evergain_core::models::*;
