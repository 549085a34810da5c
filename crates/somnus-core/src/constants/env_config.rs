// ABOUTME: Environment variable names for runtime configuration
// ABOUTME: Centralized so the config loader and its tests agree on spelling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

/// Deployment environment (development, production, testing)
pub const ENVIRONMENT: &str = "ENVIRONMENT";
/// Log level / filter directive
pub const RUST_LOG: &str = "RUST_LOG";
/// Log output format (json, pretty, compact)
pub const LOG_FORMAT: &str = "LOG_FORMAT";
/// Neighbor count used before optimization
pub const KNN_DEFAULT_K: &str = "SOMNUS_KNN_DEFAULT_K";
/// Comma-separated candidate neighbor counts for initialization
pub const KNN_CANDIDATE_KS: &str = "SOMNUS_KNN_CANDIDATE_KS";
/// Number of synthesized examples used for the k search
pub const KNN_OPTIMIZE_SAMPLE: &str = "SOMNUS_KNN_OPTIMIZE_SAMPLE";
/// Enables prediction diagnostics capture
pub const DIAGNOSTICS_ENABLED: &str = "SOMNUS_DIAGNOSTICS_ENABLED";
/// Capacity of the prediction history ring buffer
pub const DIAGNOSTICS_MAX_RECORDS: &str = "SOMNUS_DIAGNOSTICS_MAX_RECORDS";
/// Per-prediction timeout in milliseconds
pub const PREDICTION_TIMEOUT_MS: &str = "SOMNUS_PREDICTION_TIMEOUT_MS";
/// Number of recent entries aggregated per score
pub const SCORE_WINDOW_DAYS: &str = "SOMNUS_SCORE_WINDOW_DAYS";
