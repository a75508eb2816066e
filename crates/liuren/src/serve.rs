// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `liuren serve` command implementation.

use std::sync::Arc;

use liuren_config::LiurenConfig;
use liuren_core::{LiurenError, TextGenerator};
use liuren_dashscope::DashScopeProvider;
use liuren_divination::{Diviner, GenerationSettings, ReadingGenerator};
use liuren_gateway::{GatewayState, ServerConfig, start_server};
use tracing::info;

use crate::shutdown::shutdown_signal;

/// Builds the diviner, with a DashScope generator when an API key resolves.
pub fn build_diviner(config: &LiurenConfig) -> Diviner {
    let generator = DashScopeProvider::from_config(&config.dashscope)
        .map(|provider| Arc::new(provider) as Arc<dyn TextGenerator>);

    let settings = GenerationSettings {
        model: config.dashscope.model.clone(),
        max_tokens: config.dashscope.max_tokens,
        temperature: config.dashscope.temperature,
    };

    Diviner::new(ReadingGenerator::new(generator, settings))
}

/// Runs the `liuren serve` command until a shutdown signal arrives.
pub async fn run_serve(config: LiurenConfig) -> Result<(), LiurenError> {
    init_tracing(&config.server.log_level);
    info!("starting liuren serve");

    let diviner = build_diviner(&config);
    info!(reading_mode = diviner.reading_mode(), "diviner ready");

    let state = GatewayState::new(diviner, &config.server.static_dir);
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    start_server(&server_config, state, shutdown_signal()).await
}

/// Installs the global tracing subscriber on stderr. `RUST_LOG` overrides `log_level`.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("liuren={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
