// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `liuren divine` command: one divination printed as JSON.

use chrono::{Local, NaiveDateTime};
use liuren_config::LiurenConfig;
use liuren_core::{DivinationResponse, LiurenError};

use crate::serve::{build_diviner, init_tracing};

/// Runs one divination for `question` at `at` (or now) and prints it.
pub async fn run_divine(
    config: LiurenConfig,
    question: &str,
    at: Option<NaiveDateTime>,
) -> Result<(), LiurenError> {
    init_tracing(&config.server.log_level);

    let diviner = build_diviner(&config);
    let at = at.unwrap_or_else(|| Local::now().naive_local());
    let result = diviner.divine(question, at).await;

    let json = serde_json::to_string_pretty(&DivinationResponse::from(result))
        .map_err(|e| LiurenError::Internal(format!("failed to serialize result: {e}")))?;
    println!("{json}");
    Ok(())
}
