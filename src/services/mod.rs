// ABOUTME: Domain service layer built on top of the sleep score predictor
// ABOUTME: Aggregates raw sleep entries and applies the confidence-gated fallback policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

//! Domain service layer

/// Weekly aggregation, predictor call with timeout, and formula fallback
pub mod sleep_score;

pub use sleep_score::{
    initialize_predictor, FallbackReason, ScorePredictor, ScoreSource, SharedPredictor,
    SleepScoreReport, SleepScoreService, WeeklySleepStats,
};
