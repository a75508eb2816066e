// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Liuren divination service.
//!
//! Routes:
//! - `POST /api/divine`: run a divination for `{ "question": "..." }`
//! - `GET /`: the static `index.html`
//! - `GET /static/*`: other static assets
//! - `GET /health`: liveness and reading mode

pub mod handlers;
pub mod server;

pub use server::{Clock, GatewayState, HealthState, ServerConfig, build_router, start_server};
