// ABOUTME: Configuration module root for the EverGain server
// ABOUTME: Exposes environment-driven settings for HTTP, storage, auth and the LLM advisor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

/// Environment variable parsing into typed configuration
pub mod environment;

pub use environment::{AuthConfig, LlmConfig, LogFormat, ServerConfig};
