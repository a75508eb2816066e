// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types for the DashScope text-generation API.

use serde::{Deserialize, Serialize};

/// Body of a text-generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationBody {
    pub model: String,
    pub input: GenerationInput,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationInput {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Successful text-generation response.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationReply {
    pub output: GenerationOutput,
    #[serde(default)]
    pub usage: Option<ReplyUsage>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationOutput {
    pub text: String,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReplyUsage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

/// Error body returned with non-success status codes.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub request_id: Option<String>,
}
