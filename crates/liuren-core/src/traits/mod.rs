// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the divination core and external services.
//!
//! Traits use `#[async_trait]` so they can be held as `Arc<dyn ...>`.

pub mod generator;

pub use generator::TextGenerator;
