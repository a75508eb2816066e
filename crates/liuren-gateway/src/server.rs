// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    routing::{get, post},
};
use chrono::{Local, NaiveDateTime};
use liuren_core::LiurenError;
use liuren_divination::Diviner;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Source of the wall-clock time used for each divination.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// State for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

/// Shared state for axum request handlers. Read-only after construction.
#[derive(Clone)]
pub struct GatewayState {
    pub diviner: Arc<Diviner>,
    pub static_dir: PathBuf,
    pub clock: Clock,
    pub health: HealthState,
}

impl GatewayState {
    /// State using the local system clock.
    pub fn new(diviner: Diviner, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            diviner: Arc::new(diviner),
            static_dir: static_dir.into(),
            clock: Arc::new(|| Local::now().naive_local()),
            health: HealthState {
                start_time: Instant::now(),
            },
        }
    }

    /// Replaces the clock, e.g. with a fixed instant in tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

/// Gateway bind configuration (mirrors `ServerConfig` from liuren-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Builds the application router with CORS and request tracing.
pub fn build_router(state: GatewayState) -> Router {
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(handlers::get_index))
        .route("/api/divine", post(handlers::post_divine))
        .route("/health", get(handlers::get_health))
        .nest_service("/static", assets)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds `host:port` and serves until `shutdown` resolves.
pub async fn start_server<F>(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: F,
) -> Result<(), LiurenError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LiurenError::Server {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| LiurenError::Server {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server stopped");
    Ok(())
}
