// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock text generator for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use liuren_core::{GenerationRequest, GenerationResponse, LiurenError, TextGenerator, TokenUsage};

/// A scripted reply: either generated text or a provider failure message.
type Scripted = Result<String, String>;

/// A mock generator that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty, a default
/// well-formed JSON reading is returned.
#[derive(Clone, Default)]
pub struct MockGenerator {
    replies: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockGenerator {
    /// Create a mock with an empty reply queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock pre-loaded with successful text replies.
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().map(Ok).collect())),
            requests: Arc::default(),
        }
    }

    /// Create a mock whose next call fails with a provider error.
    pub fn failing(message: &str) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from([Err(message.to_string())]))),
            requests: Arc::default(),
        }
    }

    /// Queue another successful reply.
    pub async fn push_reply(&self, text: impl Into<String>) {
        self.replies.lock().await.push_back(Ok(text.into()));
    }

    /// Number of generate calls received so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// All requests received so far, in order.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }

    /// Default reply used once the queue is drained.
    pub fn default_reply() -> String {
        r#"{"analysis": "mock analysis", "prediction": "mock prediction", "advice": "mock advice"}"#
            .to_string()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock-generator"
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, LiurenError> {
        self.requests.lock().await.push(request);
        let next = self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Self::default_reply()));

        match next {
            Ok(text) => Ok(GenerationResponse {
                text,
                request_id: Some("mock-request".to_string()),
                usage: Some(TokenUsage {
                    input_tokens: 10,
                    output_tokens: 20,
                }),
            }),
            Err(message) => Err(LiurenError::Provider {
                message,
                source: None,
            }),
        }
    }
}
