// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Liuren divination service.
//!
//! Holds the error type, the payload types shared between crates, and the
//! [`TextGenerator`] seam implemented by language model providers.

pub mod error;
pub mod traits;
pub mod types;

pub use error::LiurenError;
pub use traits::TextGenerator;
pub use types::{
    DivinationResponse, DivinationResult, GenerationRequest, GenerationResponse, Outcome, Reading,
    Steps, TokenUsage,
};
