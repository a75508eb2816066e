// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use liuren_core::DivinationResponse;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::server::GatewayState;

/// Request body for POST /api/divine.
#[derive(Debug, Default, Deserialize)]
pub struct DivineRequest {
    /// The question to divine. Missing means empty.
    #[serde(default)]
    pub question: String,
}

impl DivineRequest {
    /// Parses a request body permissively: anything unparseable is an empty question.
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        serde_json::from_slice(body).unwrap_or_else(|e| {
            debug!(error = %e, "unparseable divine request body, using empty question");
            Self::default()
        })
    }
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// "generated" or "fallback".
    pub reading_mode: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /api/divine
///
/// Always answers 200; generation failures degrade to the fallback reading.
pub async fn post_divine(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Json<DivinationResponse> {
    let request = DivineRequest::from_body(&body);
    let at = (state.clock)();

    let result = state.diviner.divine(&request.question, at).await;
    info!(
        outcome = result.outcome.name,
        chinese_hour = result.chinese_hour,
        "divination completed"
    );

    Json(DivinationResponse::from(result))
}

/// GET /
///
/// Serves `index.html` from the static directory.
pub async fn get_index(State(state): State<GatewayState>) -> Response {
    let path = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "index.html not available");
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "index.html not found".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        reading_mode: state.diviner.reading_mode().to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}
