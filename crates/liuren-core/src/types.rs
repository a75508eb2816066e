// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the resolver, the reading generator and the gateway.

use serde::{Deserialize, Serialize};

/// One of the six fixed Xiaoliuren outcomes.
///
/// Instances live in a static table and are never constructed at runtime,
/// so every text field borrows `'static` data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Short label, e.g. "大安".
    pub name: &'static str,
    /// Position 0-5 in the outcome table.
    pub index: usize,
    /// Short interpretive phrase.
    pub meaning: &'static str,
    /// Classical verse.
    pub detail: &'static str,
    /// Coarse verdict: 能成, 拖延 or 难成.
    pub result: &'static str,
    /// Display color tag, passed through to clients.
    pub color: &'static str,
}

/// A three-part reading for a divination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub analysis: String,
    pub prediction: String,
    pub advice: String,
}

/// Intermediate values of the three-step reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Steps {
    /// `(month - 1) % 6`
    pub month_step: u32,
    /// `(month_step + day - 1) % 6`
    pub day_step: u32,
    /// `(day_step + hour_index - 1) % 6`, the selected outcome index.
    pub final_index: u32,
}

/// Full result of one divination, as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivinationResult {
    pub question: String,
    /// Local wall-clock time formatted as `%Y-%m-%d %H:%M:%S`.
    pub time: String,
    pub lunar_month: u32,
    pub lunar_day: u32,
    /// Double-hour slot, 1-12.
    pub chinese_hour: u32,
    #[serde(rename = "result")]
    pub outcome: Outcome,
    #[serde(rename = "ai_response")]
    pub reading: Reading,
    pub steps: Steps,
}

/// Envelope returned by the divination endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivinationResponse {
    pub success: bool,
    pub data: DivinationResult,
}

impl From<DivinationResult> for DivinationResponse {
    fn from(data: DivinationResult) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A request to a text generation provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Model identifier, e.g. "qwen-turbo".
    pub model: String,
    /// Fully rendered prompt text.
    pub prompt: String,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Token accounting reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A successful response from a text generation provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResponse {
    /// Free text produced by the model.
    pub text: String,
    /// Provider-assigned request identifier, if any.
    pub request_id: Option<String>,
    pub usage: Option<TokenUsage>,
}
