// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Liuren divination service.

use thiserror::Error;

/// The primary error type used across Liuren crates.
#[derive(Debug, Error)]
pub enum LiurenError {
    /// Configuration errors (invalid values, unusable credentials).
    #[error("configuration error: {0}")]
    Config(String),

    /// Text generation provider errors (transport failure, non-success status, bad body).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generated text did not contain a usable reading.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// HTTP server errors (bind failure, serve loop failure).
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
