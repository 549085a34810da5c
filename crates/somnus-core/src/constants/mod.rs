// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for feature ranges, KNN defaults, confidence, and fallback scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Environment variable names read by the configuration layer
pub mod env_config;

/// Service identity used by structured logging
pub mod service_names {
    /// Service name reported in log records
    pub const SOMNUS: &str = "somnus";
}

/// Fixed feature ranges used to normalize predictor inputs to `[0, 1]`
pub mod feature_ranges {
    /// Minimum average sleep duration (hours)
    pub const DURATION_MIN: f64 = 4.0;
    /// Maximum average sleep duration (hours)
    pub const DURATION_MAX: f64 = 10.0;
    /// Minimum average sleep quality
    pub const QUALITY_MIN: f64 = 0.0;
    /// Maximum average sleep quality
    pub const QUALITY_MAX: f64 = 100.0;
    /// Minimum consistency score
    pub const CONSISTENCY_MIN: f64 = 0.0;
    /// Maximum consistency score
    pub const CONSISTENCY_MAX: f64 = 20.0;
    /// Minimum sleep score
    pub const SCORE_MIN: f64 = 0.0;
    /// Maximum sleep score
    pub const SCORE_MAX: f64 = 100.0;
}

/// K-nearest-neighbors defaults
pub mod knn {
    /// Neighbor count before any optimization
    pub const DEFAULT_K: usize = 5;
    /// Candidate neighbor counts tried during initialization
    pub const INITIALIZATION_CANDIDATE_KS: [usize; 5] = [3, 5, 7, 9, 11];
    /// Candidate neighbor counts for ad-hoc optimization runs
    pub const DEFAULT_CANDIDATE_KS: [usize; 5] = [1, 3, 5, 7, 9];
    /// Number of synthesized examples held out for the initialization k search
    pub const OPTIMIZATION_SAMPLE_SIZE: usize = 100;
    /// Number of archetype-driven synthetic examples
    pub const SYNTHETIC_EXAMPLE_COUNT: usize = 1000;
    /// Half-width of the uniform noise added to synthetic scores
    pub const SCORE_NOISE_HALF_WIDTH: f64 = 2.5;
}

/// Confidence thresholds separating qualitative confidence levels
pub mod confidence {
    /// At or above: high confidence
    pub const HIGH_THRESHOLD: f64 = 0.75;
    /// At or above: medium confidence
    pub const MEDIUM_THRESHOLD: f64 = 0.45;
    /// At or above: low confidence; below: very low
    pub const LOW_THRESHOLD: f64 = 0.25;
}

/// Prediction diagnostics capture
pub mod diagnostics {
    /// Capacity of the prediction history ring buffer
    pub const MAX_RECORDS: usize = 500;
}

/// Closed-form fallback scoring buckets
pub mod fallback {
    /// Points for 7-9 hours of sleep
    pub const DURATION_OPTIMAL_POINTS: f64 = 40.0;
    /// Points for 6-7 or 9-10 hours
    pub const DURATION_NEAR_POINTS: f64 = 30.0;
    /// Points for 5-6 or more than 10 hours
    pub const DURATION_FAR_POINTS: f64 = 20.0;
    /// Points for anything else
    pub const DURATION_POOR_POINTS: f64 = 10.0;
    /// Weight applied to average quality (0-100) when scoring
    pub const QUALITY_WEIGHT: f64 = 40.0;

    /// Standard-deviation upper bounds (hours) paired with consistency points
    pub const CONSISTENCY_BUCKETS: [(f64, f64); 4] =
        [(0.5, 20.0), (1.0, 17.0), (1.5, 14.0), (2.0, 10.0)];
    /// Consistency points when the deviation exceeds every bucket
    pub const CONSISTENCY_FLOOR_POINTS: f64 = 7.0;
}

/// Sleep-score service defaults
pub mod service {
    /// Number of most recent entries aggregated into one feature vector
    pub const SCORE_WINDOW_DAYS: usize = 7;
    /// Time budget for a single prediction before falling back
    pub const PREDICTION_TIMEOUT_MS: u64 = 2_000;
}
