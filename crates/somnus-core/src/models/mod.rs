// ABOUTME: Sleep data models shared between the predictor core and the scoring service
// ABOUTME: Nightly sleep entries and the three-scalar feature vector derived from them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

/// Nightly sleep entry recorded by the user
pub mod sleep;

pub use sleep::{SleepEntry, SleepFeatures};
