// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::LiurenConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &LiurenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let server = &config.server;
    if server.host.trim().is_empty() {
        fail("server.host must not be empty".to_string());
    }
    if server.port == 0 {
        fail("server.port must be between 1 and 65535".to_string());
    }
    if !LOG_LEVELS.contains(&server.log_level.as_str()) {
        fail(format!(
            "server.log_level `{}` is not one of {}",
            server.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    let dashscope = &config.dashscope;
    if dashscope.model.trim().is_empty() {
        fail("dashscope.model must not be empty".to_string());
    }
    if dashscope.max_tokens == 0 {
        fail("dashscope.max_tokens must be greater than 0".to_string());
    }
    if !(0.0..=2.0).contains(&dashscope.temperature) {
        fail(format!(
            "dashscope.temperature must be within 0.0..=2.0, got {}",
            dashscope.temperature
        ));
    }
    if dashscope.timeout_secs == 0 {
        fail("dashscope.timeout_secs must be greater than 0".to_string());
    }
    if !(dashscope.base_url.starts_with("http://") || dashscope.base_url.starts_with("https://")) {
        fail(format!(
            "dashscope.base_url `{}` must start with http:// or https://",
            dashscope.base_url
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
