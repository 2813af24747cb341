// ABOUTME: Error handling surface for the server crate
// ABOUTME: Re-exports the shared AppError types so handlers can return them directly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

pub use evergain_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
