// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DashScope text generation provider for Liuren.
//!
//! Implements [`TextGenerator`] against the DashScope text-generation
//! endpoint. The API key comes from `dashscope.api_key` in config, then the
//! `DASHSCOPE_API_KEY` environment variable. With neither set no provider is
//! built and the service runs in fallback-only mode.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use liuren_config::DashScopeConfig;
use liuren_core::{GenerationRequest, GenerationResponse, LiurenError, TextGenerator, TokenUsage};
use tracing::{info, warn};

use crate::client::DashScopeClient;
use crate::types::{GenerationBody, GenerationInput, GenerationParameters};

/// Environment variable consulted when the config has no API key.
pub const API_KEY_ENV: &str = "DASHSCOPE_API_KEY";

/// DashScope provider implementing [`TextGenerator`].
#[derive(Debug, Clone)]
pub struct DashScopeProvider {
    client: DashScopeClient,
}

impl DashScopeProvider {
    /// Builds a provider for `api_key` using the endpoint and timeout from `config`.
    pub fn new(config: &DashScopeConfig, api_key: &str) -> Result<Self, LiurenError> {
        let client = DashScopeClient::new(
            api_key,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self { client })
    }

    /// Builds a provider if an API key can be resolved and accepted, else `None`.
    pub fn from_config(config: &DashScopeConfig) -> Option<Self> {
        let api_key = resolve_api_key(
            config.api_key.as_deref(),
            std::env::var(API_KEY_ENV).ok().as_deref(),
        );
        build_provider(config, api_key)
    }
}

/// Picks the configured key, then the environment key. Blank keys count as absent.
pub fn resolve_api_key(configured: Option<&str>, from_env: Option<&str>) -> Option<String> {
    configured
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .or_else(|| from_env.map(str::trim).filter(|k| !k.is_empty()))
        .map(str::to_string)
}

/// Builds a provider when `api_key` is present.
///
/// A key the client rejects (for example one that is not a valid header
/// value) is logged and treated like a missing key.
pub fn build_provider(
    config: &DashScopeConfig,
    api_key: Option<String>,
) -> Option<DashScopeProvider> {
    let Some(key) = api_key else {
        info!("no DashScope API key configured, readings will use the fallback template");
        return None;
    };

    match DashScopeProvider::new(config, &key) {
        Ok(provider) => {
            info!(model = %config.model, "DashScope provider initialized");
            Some(provider)
        }
        Err(e) => {
            warn!(
                error = %e,
                "DashScope provider unavailable, readings will use the fallback template"
            );
            None
        }
    }
}

#[async_trait]
impl TextGenerator for DashScopeProvider {
    fn name(&self) -> &str {
        "dashscope"
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, LiurenError> {
        let body = GenerationBody {
            model: request.model,
            input: GenerationInput {
                prompt: request.prompt,
            },
            parameters: GenerationParameters {
                max_tokens: request.max_tokens,
                temperature: request.temperature,
            },
        };

        let reply = self.client.generate(&body).await?;
        if reply.output.finish_reason.as_deref() == Some("length") {
            warn!(
                max_tokens = body.parameters.max_tokens,
                "generation stopped at the token limit"
            );
        }

        Ok(GenerationResponse {
            text: reply.output.text,
            request_id: reply.request_id,
            usage: reply.usage.map(|u| TokenUsage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            }),
        })
    }
}
