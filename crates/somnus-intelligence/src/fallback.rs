// ABOUTME: Deterministic closed-form sleep score used when the KNN estimate is untrustworthy
// ABOUTME: Buckets average duration and duration variability, adds weighted average quality
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

//! Formula fallback
//!
//! `score = duration_points(avg_duration) + avg_quality / 100 * 40 + consistency_points(std_dev)`
//!
//! Pure arithmetic over already-known inputs; it cannot fail.

use crate::training_data::round_score;
use serde::{Deserialize, Serialize};
use somnus_core::constants::fallback;

/// Itemized formula score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackScore {
    /// Points awarded for average duration (10-40)
    pub duration_score: f64,
    /// Points awarded for average quality (0-40)
    pub quality_score: f64,
    /// Points awarded for duration regularity (7-20)
    pub consistency_score: f64,
    /// Rounded total, clamped to 0-100
    pub total: u8,
}

impl FallbackScore {
    /// Score a week from its average duration, average quality, and duration standard deviation
    #[must_use]
    pub fn calculate(avg_duration: f64, avg_quality: f64, duration_std_dev: f64) -> Self {
        let duration_score = duration_points(avg_duration);
        let quality_score = quality_points(avg_quality);
        let consistency_score = consistency_points(duration_std_dev);

        Self {
            duration_score,
            quality_score,
            consistency_score,
            total: round_score(duration_score + quality_score + consistency_score),
        }
    }
}

/// Points for average nightly duration (hours)
#[must_use]
pub fn duration_points(avg_duration: f64) -> f64 {
    if (7.0..=9.0).contains(&avg_duration) {
        fallback::DURATION_OPTIMAL_POINTS
    } else if (6.0..7.0).contains(&avg_duration) || (avg_duration > 9.0 && avg_duration <= 10.0) {
        fallback::DURATION_NEAR_POINTS
    } else if (5.0..6.0).contains(&avg_duration) || avg_duration > 10.0 {
        fallback::DURATION_FAR_POINTS
    } else {
        fallback::DURATION_POOR_POINTS
    }
}

/// Points for average quality on a 0-100 scale
#[must_use]
pub fn quality_points(avg_quality: f64) -> f64 {
    avg_quality / 100.0 * fallback::QUALITY_WEIGHT
}

/// Consistency points for the standard deviation of nightly durations (hours)
///
/// The result doubles as the predictor's 0-20 consistency feature.
#[must_use]
pub fn consistency_points(duration_std_dev: f64) -> f64 {
    fallback::CONSISTENCY_BUCKETS
        .iter()
        .find(|(upper, _)| duration_std_dev < *upper)
        .map_or(fallback::CONSISTENCY_FLOOR_POINTS, |(_, points)| *points)
}

/// Population standard deviation; zero for fewer than two values
#[must_use]
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
