// ABOUTME: Helper modules shared by the HTTP integration tests
// ABOUTME: Re-exports the axum request builder used to drive routers in-process
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

pub mod axum_test;
