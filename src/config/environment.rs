// ABOUTME: Environment-based configuration loading for server, auth and advisor settings
// ABOUTME: Every value has a default; malformed values fail fast with a ConfigError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};

use crate::constants::defaults;
use crate::errors::{AppError, AppResult};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(AppError::config(format!(
                "LOG_FORMAT must be 'pretty' or 'json', got '{other}'"
            ))),
        }
    }
}

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
}

/// Feedback advisor configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Gemini API key; `None` selects the offline fallback advisor
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// REST base URL
    pub base_url: String,
    /// Outbound request timeout
    pub timeout: Duration,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Listen address
    pub host: String,
    /// `SQLite` connection URL
    pub database_url: String,
    /// Token settings
    pub auth: AuthConfig,
    /// Advisor settings
    pub llm: LlmConfig,
    /// Offset applied when rendering instants for clients
    pub display_offset: FixedOffset,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Log output format
    pub log_format: LogFormat,
    /// Allowed CORS origins; `["*"]` allows any
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            host: defaults::HOST.to_owned(),
            database_url: defaults::DATABASE_URL.to_owned(),
            auth: AuthConfig {
                jwt_secret: defaults::DEV_JWT_SECRET.to_owned(),
                jwt_expiry_hours: defaults::JWT_EXPIRY_HOURS,
            },
            llm: LlmConfig {
                api_key: None,
                model: defaults::GEMINI_MODEL.to_owned(),
                base_url: defaults::GEMINI_BASE_URL.to_owned(),
                timeout: Duration::from_secs(defaults::LLM_TIMEOUT_SECS),
            },
            display_offset: FixedOffset::east_opt(defaults::DISPLAY_UTC_OFFSET_HOURS * 3600)
                .unwrap_or_else(|| Utc.fix()),
            request_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            log_format: LogFormat::Pretty,
            cors_allowed_origins: vec!["*".to_owned()],
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        let fallback = Self::default();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development secret");
            defaults::DEV_JWT_SECRET.to_owned()
        });

        let offset_hours: i32 =
            parse_env("DISPLAY_UTC_OFFSET_HOURS", defaults::DISPLAY_UTC_OFFSET_HOURS)?;
        let display_offset = offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                AppError::config(format!(
                    "DISPLAY_UTC_OFFSET_HOURS out of range: {offset_hours}"
                ))
            })?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS").map_or_else(
            |_| fallback.cors_allowed_origins.clone(),
            |raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_owned)
                    .collect()
            },
        );

        Ok(Self {
            http_port: parse_env("HTTP_PORT", defaults::HTTP_PORT)?,
            host: env::var("HOST").unwrap_or(fallback.host),
            database_url: env::var("DATABASE_URL").unwrap_or(fallback.database_url),
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: parse_env("JWT_EXPIRY_HOURS", defaults::JWT_EXPIRY_HOURS)?,
            },
            llm: LlmConfig {
                api_key: env::var("GEMINI_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                model: env::var("GEMINI_MODEL").unwrap_or(fallback.llm.model),
                base_url: env::var("GEMINI_BASE_URL").unwrap_or(fallback.llm.base_url),
                timeout: fallback.llm.timeout,
            },
            display_offset,
            request_timeout: Duration::from_secs(parse_env(
                "REQUEST_TIMEOUT_SECS",
                defaults::REQUEST_TIMEOUT_SECS,
            )?),
            log_format: env::var("LOG_FORMAT")
                .ok()
                .map(|raw| raw.parse())
                .transpose()?
                .unwrap_or_default(),
            cors_allowed_origins,
        })
    }

    /// Whether CORS should allow any origin
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|origin| origin == "*")
    }
}

fn parse_env<T>(name: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid value for {name} ('{raw}'): {e}"))),
        Err(_) => Ok(default),
    }
}
