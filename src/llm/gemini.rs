// ABOUTME: Google Gemini REST client implementing the workout feedback advisor
// ABOUTME: Sends the coaching prompt to generateContent and parses the first candidate's text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{build_prompt, parse_feedback, FeedbackAdvisor};
use crate::config::LlmConfig;
use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::models::{Workout, WorkoutFeedback, WorkoutSubmission};

const SERVICE: &str = "gemini";

/// Gemini client configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,
    /// Model name (e.g. `gemini-pro`)
    pub model: String,
    /// REST base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: defaults::GEMINI_MODEL.to_owned(),
            base_url: defaults::GEMINI_BASE_URL.to_owned(),
            timeout: Duration::from_secs(defaults::LLM_TIMEOUT_SECS),
        }
    }
}

impl GeminiConfig {
    /// Build from server configuration; `None` when no API key is configured
    #[must_use]
    pub fn from_llm_config(config: &LlmConfig) -> Option<Self> {
        config.api_key.as_ref().map(|api_key| Self {
            api_key: api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Feedback advisor backed by Gemini `generateContent`
pub struct GeminiAdvisor {
    config: GeminiConfig,
    client: Client,
}

impl GeminiAdvisor {
    /// Create a new advisor
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the HTTP client cannot be built
    pub fn new(config: GeminiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build Gemini HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl FeedbackAdvisor for GeminiAdvisor {
    fn name(&self) -> &'static str {
        SERVICE
    }

    #[tracing::instrument(skip(self, current, history), fields(history = history.len()))]
    async fn analyze(
        &self,
        current: &WorkoutSubmission,
        history: &[Workout],
    ) -> AppResult<WorkoutFeedback> {
        let prompt = build_prompt(current, history);
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: &prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Gemini returned an error status");
            return Err(AppError::external_service(
                SERVICE,
                format!("Unexpected status {status}"),
            ));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("Failed to decode response: {e}"))
        })?;

        let text = body
            .candidates
            .into_iter()
            .find_map(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
            .ok_or_else(|| AppError::external_service(SERVICE, "No response from model"))?;

        debug!(bytes = text.len(), "Gemini response received");
        parse_feedback(&text)
    }
}
