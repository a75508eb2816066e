// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router-level tests for the gateway, driven through `tower::ServiceExt`.

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{NaiveDate, NaiveDateTime};
use liuren_divination::{Diviner, GenerationSettings, OUTCOMES, ReadingGenerator, fallback_reading};
use liuren_gateway::{GatewayState, build_router};
use liuren_test_utils::MockGenerator;
use serde_json::Value;
use tower::ServiceExt;

fn june_fifteenth_afternoon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 6, 15)
        .unwrap()
        .and_hms_opt(14, 3, 0)
        .unwrap()
}

fn state(readings: ReadingGenerator, static_dir: &std::path::Path) -> GatewayState {
    let fixed = june_fifteenth_afternoon();
    GatewayState::new(Diviner::new(readings), static_dir).with_clock(Arc::new(move || fixed))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn divine_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/divine")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn divine_returns_full_payload_in_fallback_mode() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(state(ReadingGenerator::fallback_only(), dir.path()));

    let response = app
        .oneshot(divine_request(r#"{"question": "这次出行顺利吗？"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let data = &json["data"];
    assert_eq!(data["question"], "这次出行顺利吗？");
    assert_eq!(data["time"], "2026-06-15 14:03:00");
    assert_eq!(data["lunar_month"], 6);
    assert_eq!(data["lunar_day"], 15);
    assert_eq!(data["chinese_hour"], 8);
    assert_eq!(data["steps"]["month_step"], 5);
    assert_eq!(data["steps"]["day_step"], 1);
    assert_eq!(data["steps"]["final_index"], 2);

    let expected = &OUTCOMES[2];
    assert_eq!(data["result"]["name"], expected.name);
    assert_eq!(data["result"]["index"], expected.index);
    assert_eq!(data["result"]["meaning"], expected.meaning);
    assert_eq!(data["result"]["detail"], expected.detail);
    assert_eq!(data["result"]["result"], expected.result);
    assert_eq!(data["result"]["color"], expected.color);

    let fallback = fallback_reading(expected);
    assert_eq!(data["ai_response"]["analysis"], fallback.analysis);
    assert_eq!(data["ai_response"]["prediction"], fallback.prediction);
    assert_eq!(data["ai_response"]["advice"], fallback.advice);
}

#[tokio::test]
async fn divine_without_question_uses_empty_string() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(state(ReadingGenerator::fallback_only(), dir.path()));

    let response = app.oneshot(divine_request("{}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["question"], "");
}

#[tokio::test]
async fn divine_with_malformed_body_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(state(ReadingGenerator::fallback_only(), dir.path()));

    let response = app.oneshot(divine_request("{{{")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["question"], "");
}

#[tokio::test]
async fn divine_uses_generated_reading_when_available() {
    let dir = tempfile::tempdir().unwrap();
    let mock = MockGenerator::with_replies(vec![
        "卦象如下：{\"analysis\": \"A\", \"prediction\": \"P\", \"advice\": \"V\"}".into(),
    ]);
    let readings = ReadingGenerator::new(Some(Arc::new(mock.clone())), GenerationSettings::default());
    let app = build_router(state(readings, dir.path()));

    let response = app
        .oneshot(divine_request(r#"{"question": "考试能过吗？"}"#))
        .await
        .unwrap();
    let json = body_json(response).await;

    assert_eq!(json["data"]["ai_response"]["analysis"], "A");
    assert_eq!(json["data"]["ai_response"]["prediction"], "P");
    assert_eq!(json["data"]["ai_response"]["advice"], "V");
    assert_eq!(mock.call_count().await, 1);
    assert!(mock.requests().await[0].prompt.contains("考试能过吗？"));
}

#[tokio::test]
async fn index_serves_static_html() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>小六壬</h1>").unwrap();
    let app = build_router(state(ReadingGenerator::fallback_only(), dir.path()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(std::str::from_utf8(&bytes).unwrap(), "<h1>小六壬</h1>");
}

#[tokio::test]
async fn missing_index_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(state(ReadingGenerator::fallback_only(), dir.path()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "index.html not found");
}

#[tokio::test]
async fn static_assets_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('ok');").unwrap();
    let app = build_router(state(ReadingGenerator::fallback_only(), dir.path()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/static/app.js")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_reports_reading_mode() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(state(ReadingGenerator::fallback_only(), dir.path()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["reading_mode"], "fallback");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(state(ReadingGenerator::fallback_only(), dir.path()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/divine")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
