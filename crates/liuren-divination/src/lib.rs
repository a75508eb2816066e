// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Xiaoliuren divination: outcome resolution and reading generation.
//!
//! [`Diviner`] is the entry point used by the gateway and the CLI. It runs
//! the pure [`resolver`] for a timestamp, then asks the [`reading`] generator
//! for a reading of the selected outcome, and assembles a
//! [`DivinationResult`].

pub mod outcome;
pub mod reading;
pub mod resolver;

use chrono::{Local, NaiveDateTime};
use liuren_core::DivinationResult;
use tracing::debug;

pub use outcome::OUTCOMES;
pub use reading::{
    GenerationSettings, ReadingGenerator, ReadingStrategy, extract_reading, fallback_reading,
    render_prompt,
};
pub use resolver::{Resolution, double_hour, resolve, resolve_parts};

/// Format used for the `time` field of a result.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable descriptor embedded in the generation prompt.
pub fn time_descriptor(month: u32, day: u32, hour_index: u32) -> String {
    format!("农历{month}月{day}日第{hour_index}时辰")
}

/// Runs complete divinations. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct Diviner {
    readings: ReadingGenerator,
}

impl Diviner {
    pub fn new(readings: ReadingGenerator) -> Self {
        Self { readings }
    }

    /// `"generated"` when an external generator is configured, else `"fallback"`.
    pub fn reading_mode(&self) -> &'static str {
        self.readings.strategy().mode()
    }

    /// Divines `question` at the given local wall-clock time.
    pub async fn divine(&self, question: &str, at: NaiveDateTime) -> DivinationResult {
        let resolution = resolve(at);
        debug!(
            month = resolution.month,
            day = resolution.day,
            hour_index = resolution.hour_index,
            outcome = resolution.outcome.name,
            "outcome resolved"
        );

        let descriptor = time_descriptor(resolution.month, resolution.day, resolution.hour_index);
        let reading = self
            .readings
            .generate(question, resolution.outcome, &descriptor)
            .await;

        DivinationResult {
            question: question.to_string(),
            time: at.format(TIME_FORMAT).to_string(),
            lunar_month: resolution.month,
            lunar_day: resolution.day,
            chinese_hour: resolution.hour_index,
            outcome: *resolution.outcome,
            reading,
            steps: resolution.steps,
        }
    }

    /// Divines `question` at the current local time.
    pub async fn divine_now(&self, question: &str) -> DivinationResult {
        self.divine(question, Local::now().naive_local()).await
    }
}
