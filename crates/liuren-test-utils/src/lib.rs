// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Liuren integration tests.
//!
//! Provides [`MockGenerator`], a scripted [`TextGenerator`](liuren_core::TextGenerator)
//! that records every request it receives, so tests can assert both on the
//! reading produced and on whether an outbound call happened at all.

pub mod mock_generator;

pub use mock_generator::MockGenerator;
