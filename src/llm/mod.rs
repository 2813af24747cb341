// ABOUTME: Workout feedback advisor abstraction with prompt building and response parsing
// ABOUTME: Providers implement FeedbackAdvisor; parsing tolerates markdown-fenced JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

//! LLM feedback advisor
//!
//! The advisor receives the current submission plus up to five recent
//! workouts and answers with a JSON verdict:
//!
//! ```json
//! {"status": "progress_up", "advice": "...", "color": "#C6FF5E", "risk": "Safe"}
//! ```
//!
//! Missing fields fall back to a neutral verdict. A response with no JSON
//! object at all is an error, which the workout service turns into its own
//! fallback feedback.

/// Google Gemini implementation
pub mod gemini;

pub use gemini::{GeminiAdvisor, GeminiConfig};

use std::fmt::Write;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::constants::colors;
use crate::errors::{AppError, AppResult};
use crate::models::{ProgressStatus, Workout, WorkoutFeedback, WorkoutSubmission};

/// Produces coaching feedback for a workout submission
#[async_trait]
pub trait FeedbackAdvisor: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Judge the submission against recent history (newest first)
    async fn analyze(
        &self,
        current: &WorkoutSubmission,
        history: &[Workout],
    ) -> AppResult<WorkoutFeedback>;
}

/// Build the coaching prompt
#[must_use]
pub fn build_prompt(current: &WorkoutSubmission, history: &[Workout]) -> String {
    let mut history_lines = String::new();
    for workout in history {
        let _ = writeln!(
            history_lines,
            "- Date: {}, Weight: {}kg, Reps: {}, Sets: {}, Feeling: {}",
            workout.created_at.format("%Y-%m-%d"),
            workout.weight,
            workout.reps,
            workout.sets,
            workout.feeling
        );
    }

    format!(
        r##"
You are EverGain AI, a smart fitness coach.
Analyze the user's latest workout and compare it with history.

**Context (Color System - Smart Growth Noir):**
- **Lime Green ({progress})**: Progress Up / Success / Good Overload.
- **Electric Blue ({stagnant})**: Stagnant / Maintenance / Needs Optimization.
- **Red ({unsafe_color})**: Unsafe / Ego Lifting / Injury Risk / Performance Drop.

**User History (Last 5 sessions):**
{history_lines}
**Current Session:**
- Weight: {weight}kg
- Reps: {reps}
- Sets: {sets}
- Feeling: {feeling}

**Task:**
Analyze the progress. Is it up, stagnant, or down?
Provide brief, punchy advice (max 2 sentences).
Assign the correct hex color based on the status.
Assess risk (Safe / Caution / High Risk).

**Output JSON ONLY:**
{{
  "status": "progress_up" | "stagnant" | "unsafe" | "down",
  "advice": "...",
  "color": "#HEX",
  "risk": "..."
}}
"##,
        progress = colors::PROGRESS,
        stagnant = colors::STAGNANT,
        unsafe_color = colors::UNSAFE,
        weight = current.weight,
        reps = current.reps,
        sets = current.sets,
        feeling = current.feeling,
    )
}

#[derive(Debug, Deserialize)]
struct RawFeedback {
    status: Option<String>,
    advice: Option<String>,
    color: Option<String>,
    risk: Option<String>,
}

/// Parse the advisor's reply, tolerating markdown code fences around the JSON
///
/// # Errors
///
/// Returns `ExternalServiceError` if no JSON object can be extracted
pub fn parse_feedback(raw_content: &str) -> AppResult<WorkoutFeedback> {
    let trimmed = raw_content.trim();
    let raw: RawFeedback = serde_json::from_str(trimmed).or_else(|_| {
        // LLMs sometimes wrap JSON in markdown code blocks
        let start = trimmed.find('{');
        let end = trimmed.rfind('}');
        match (start, end) {
            (Some(start), Some(end)) if start < end => serde_json::from_str(&trimmed[start..=end])
                .map_err(|e| {
                    warn!(
                        "Failed to parse advisor JSON response ({} bytes): {e}",
                        raw_content.len()
                    );
                    AppError::external_service("llm", "Advisor returned malformed JSON")
                }),
            _ => Err(AppError::external_service(
                "llm",
                "Advisor response contained no JSON object",
            )),
        }
    })?;

    Ok(WorkoutFeedback {
        status: raw
            .status
            .as_deref()
            .map_or(ProgressStatus::Stagnant, ProgressStatus::parse),
        advice: raw
            .advice
            .unwrap_or_else(|| "Good effort. Keep tracking your progress.".to_owned()),
        color: raw.color.unwrap_or_else(|| colors::STAGNANT.to_owned()),
        risk: raw.risk.unwrap_or_else(|| "Safe".to_owned()),
    })
}
