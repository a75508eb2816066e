// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text generator trait for large language model integrations.

use async_trait::async_trait;

use crate::error::LiurenError;
use crate::types::{GenerationRequest, GenerationResponse};

/// A single-shot text generation backend.
///
/// Implementations make at most one outbound call per [`generate`](Self::generate)
/// and report any failure, including non-success status codes, as an error.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short name used in logs, e.g. "dashscope".
    fn name(&self) -> &str;

    /// Sends a prompt and returns the generated text.
    async fn generate(&self, request: GenerationRequest)
    -> Result<GenerationResponse, LiurenError>;
}
