// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: HTTP request -> gateway -> diviner -> DashScope (mocked).

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::Request;
use chrono::NaiveDate;
use liuren_config::DashScopeConfig;
use liuren_core::TextGenerator;
use liuren_dashscope::build_provider;
use liuren_divination::{Diviner, GenerationSettings, OUTCOMES, ReadingGenerator, fallback_reading};
use liuren_gateway::{GatewayState, build_router};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds the gateway the way `liuren serve` does, against `base_url`.
fn app_for(base_url: String, api_key: Option<&str>) -> axum::Router {
    let config = DashScopeConfig {
        base_url,
        ..Default::default()
    };
    let generator = build_provider(&config, api_key.map(str::to_string))
        .map(|p| Arc::new(p) as Arc<dyn TextGenerator>);
    let diviner = Diviner::new(ReadingGenerator::new(generator, GenerationSettings::default()));

    let fixed = NaiveDate::from_ymd_opt(2026, 6, 15)
        .unwrap()
        .and_hms_opt(14, 3, 0)
        .unwrap();
    let static_dir = std::env::temp_dir();
    build_router(GatewayState::new(diviner, static_dir).with_clock(Arc::new(move || fixed)))
}

async fn divine(app: axum::Router, question: &str) -> Value {
    let body = serde_json::json!({ "question": question }).to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/divine")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn dashscope_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "output": {"text": text, "finish_reason": "stop"},
        "usage": {"input_tokens": 300, "output_tokens": 200},
        "request_id": "e2e-request"
    }))
}

fn assert_fallback(json: &Value) {
    let fallback = fallback_reading(&OUTCOMES[2]);
    assert_eq!(json["data"]["ai_response"]["analysis"], fallback.analysis);
    assert_eq!(json["data"]["ai_response"]["prediction"], fallback.prediction);
    assert_eq!(json["data"]["ai_response"]["advice"], fallback.advice);
}

#[tokio::test]
async fn no_credential_never_calls_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(dashscope_reply("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let json = divine(app_for(server.uri(), None), "今年能升职吗？").await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["result"]["name"], "速喜");
    assert_fallback(&json);
}

#[tokio::test]
async fn generated_reading_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(dashscope_reply(
            "以下是解读：\n{\"analysis\": \"速喜临门\", \"prediction\": \"近日有好消息\", \"advice\": \"主动争取\"}",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let json = divine(app_for(server.uri(), Some("sk-e2e")), "今年能升职吗？").await;
    assert_eq!(json["data"]["ai_response"]["analysis"], "速喜临门");
    assert_eq!(json["data"]["ai_response"]["prediction"], "近日有好消息");
    assert_eq!(json["data"]["ai_response"]["advice"], "主动争取");
}

#[tokio::test]
async fn success_without_json_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(dashscope_reply("这是一段没有结构的回答。"))
        .expect(1)
        .mount(&server)
        .await;

    let json = divine(app_for(server.uri(), Some("sk-e2e")), "问财运").await;
    assert_eq!(json["success"], true);
    assert_fallback(&json);
}

#[tokio::test]
async fn api_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "code": "InternalError",
            "message": "upstream failure"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let json = divine(app_for(server.uri(), Some("sk-e2e")), "问健康").await;
    assert_eq!(json["success"], true);
    assert_fallback(&json);
}

#[tokio::test]
async fn unreachable_api_falls_back() {
    // Nothing listens on the discard port in test environments.
    let app = app_for("http://127.0.0.1:9/generation".to_string(), Some("sk-e2e"));

    let json = divine(app, "问出行").await;
    assert_eq!(json["success"], true);
    assert_fallback(&json);
}
