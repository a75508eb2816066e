// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome resolver: maps a timestamp to one of the six outcomes.
//!
//! The month and day are the Gregorian calendar values used as-is; no
//! lunisolar conversion is performed. The hour of day is folded into one of
//! twelve two-hour slots, and the three values are reduced modulo 6:
//!
//! ```text
//! month_step  = (month - 1) % 6
//! day_step    = (month_step + day - 1) % 6
//! final_index = (day_step + hour_index - 1) % 6
//! ```

use chrono::{Datelike, NaiveDateTime, Timelike};
use liuren_core::{Outcome, Steps};

use crate::outcome::OUTCOMES;

/// Number of outcomes in the cycle.
const CYCLE: u32 = 6;

/// Everything derived from a timestamp before any reading is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub month: u32,
    pub day: u32,
    /// Double-hour slot, 1-12.
    pub hour_index: u32,
    pub outcome_index: usize,
    pub outcome: &'static Outcome,
    pub steps: Steps,
}

/// Maps an hour of day (0-23) to its double-hour slot (1-12).
///
/// Slot `i` starts at `(2i + 21) % 24` and spans two hours, so slot 1 covers
/// 23:00-00:59 and slot 12 covers 21:00-22:59. Falls back to slot 1 if no
/// slot matches.
pub fn double_hour(hour: u32) -> u32 {
    (1..=12)
        .find(|&slot| {
            let start = (2 * slot + 21) % 24;
            (hour + 24 - start) % 24 < 2
        })
        .unwrap_or(1)
}

/// Runs the three-step reduction over raw month, day and double-hour values.
///
/// `x - 1` is written as `x + 5` under the modulus so that zero inputs cannot
/// underflow; for every value >= 1 the result is identical.
pub fn reduce(month: u32, day: u32, hour_index: u32) -> Steps {
    let month_step = (month + CYCLE - 1) % CYCLE;
    let day_step = (month_step + day + CYCLE - 1) % CYCLE;
    let final_index = (day_step + hour_index + CYCLE - 1) % CYCLE;
    Steps {
        month_step,
        day_step,
        final_index,
    }
}

/// Resolves raw calendar components: month (1-12), day (1-31), hour of day (0-23).
pub fn resolve_parts(month: u32, day: u32, hour_of_day: u32) -> Resolution {
    let hour_index = double_hour(hour_of_day);
    let steps = reduce(month, day, hour_index);
    let outcome_index = steps.final_index as usize;

    Resolution {
        month,
        day,
        hour_index,
        outcome_index,
        outcome: &OUTCOMES[outcome_index],
        steps,
    }
}

/// Resolves the outcome for a local wall-clock timestamp.
pub fn resolve(at: NaiveDateTime) -> Resolution {
    resolve_parts(at.month(), at.day(), at.hour())
}
