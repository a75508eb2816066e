// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the DashScope text-generation API.
//!
//! Makes exactly one request per call. Non-success status codes and
//! unreadable bodies are returned as [`LiurenError::Provider`].

use std::time::Duration;

use liuren_core::LiurenError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorBody, GenerationBody, GenerationReply};

/// HTTP client for DashScope communication.
#[derive(Debug, Clone)]
pub struct DashScopeClient {
    client: reqwest::Client,
    base_url: String,
}

impl DashScopeClient {
    /// Creates a client that authenticates with `api_key` against `base_url`.
    pub fn new(api_key: &str, base_url: String, timeout: Duration) -> Result<Self, LiurenError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| LiurenError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| LiurenError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, base_url })
    }

    /// Sends one generation request and returns the parsed reply.
    pub async fn generate(&self, body: &GenerationBody) -> Result<GenerationReply, LiurenError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(body)
            .send()
            .await
            .map_err(|e| LiurenError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %body.model, "generation response received");

        let text = response.text().await.map_err(|e| LiurenError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorBody>(&text) {
                Ok(api_err) => format!(
                    "DashScope API error ({}): {}",
                    api_err.code, api_err.message
                ),
                Err(_) => format!("API returned {status}: {text}"),
            };
            return Err(LiurenError::Provider {
                message,
                source: None,
            });
        }

        serde_json::from_str(&text).map_err(|e| LiurenError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GenerationInput, GenerationParameters};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> DashScopeClient {
        DashScopeClient::new("test-api-key", base_url.to_string(), Duration::from_secs(5)).unwrap()
    }

    fn test_body() -> GenerationBody {
        GenerationBody {
            model: "qwen-turbo".into(),
            input: GenerationInput {
                prompt: "Hello".into(),
            },
            parameters: GenerationParameters {
                max_tokens: 800,
                temperature: 0.8,
            },
        }
    }

    #[tokio::test]
    async fn generate_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "output": {"text": "你好", "finish_reason": "stop"},
                "usage": {"input_tokens": 12, "output_tokens": 3},
                "request_id": "req-1"
            })))
            .mount(&server)
            .await;

        let reply = test_client(&server.uri()).generate(&test_body()).await.unwrap();
        assert_eq!(reply.output.text, "你好");
        assert_eq!(reply.request_id.as_deref(), Some("req-1"));
        assert_eq!(reply.usage.unwrap().input_tokens, 12);
    }

    #[tokio::test]
    async fn client_sends_auth_header_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "model": "qwen-turbo",
                "input": {"prompt": "Hello"},
                "parameters": {"max_tokens": 800}
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"output": {"text": "ok"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).generate(&test_body()).await;
        assert!(result.is_ok(), "request should match: {result:?}");
    }

    #[tokio::test]
    async fn api_error_body_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "code": "InvalidApiKey",
                "message": "Invalid API-key provided."
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate(&test_body())
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("InvalidApiKey"), "got: {err}");
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate(&test_body())
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("503"), "got: {err}");
        assert!(err.contains("overloaded"), "got: {err}");
    }

    #[tokio::test]
    async fn malformed_success_body_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate(&test_body())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse API response"));
    }

    #[test]
    fn invalid_key_is_a_config_error() {
        let err = DashScopeClient::new("bad\nkey", "http://localhost".into(), Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, LiurenError::Config(_)));
    }
}
