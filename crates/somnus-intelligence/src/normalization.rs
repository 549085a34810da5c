// ABOUTME: Fixed-range min-max normalization for the three predictor features
// ABOUTME: Inverse mapping converts a normalized label back to a 0-100 sleep score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

use serde::{Deserialize, Serialize};
use somnus_core::constants::feature_ranges;
use somnus_core::models::SleepFeatures;

/// Inclusive value range of a feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl FeatureRange {
    /// Clamp a value into this range
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// The three features the predictor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    /// Average sleep duration in hours
    Duration,
    /// Average sleep quality on a 0-100 scale
    Quality,
    /// Consistency score on a 0-20 scale
    Consistency,
}

impl FeatureKind {
    /// All features in vector order
    pub const ALL: [Self; 3] = [Self::Duration, Self::Quality, Self::Consistency];

    /// Declared range of this feature
    #[must_use]
    pub const fn range(self) -> FeatureRange {
        match self {
            Self::Duration => FeatureRange {
                min: feature_ranges::DURATION_MIN,
                max: feature_ranges::DURATION_MAX,
            },
            Self::Quality => FeatureRange {
                min: feature_ranges::QUALITY_MIN,
                max: feature_ranges::QUALITY_MAX,
            },
            Self::Consistency => FeatureRange {
                min: feature_ranges::CONSISTENCY_MIN,
                max: feature_ranges::CONSISTENCY_MAX,
            },
        }
    }

    /// Lowercase feature name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Duration => "duration",
            Self::Quality => "quality",
            Self::Consistency => "consistency",
        }
    }
}

/// Rescale `value` into `[0, 1]` using the feature's fixed range
///
/// Out-of-range inputs are not clamped and map outside the unit interval.
#[must_use]
pub fn normalize(value: f64, kind: FeatureKind) -> f64 {
    let FeatureRange { min, max } = kind.range();
    (value - min) / (max - min)
}

/// Inverse of [`normalize`] for an arbitrary range
#[must_use]
pub fn denormalize(value: f64, min: f64, max: f64) -> f64 {
    value.mul_add(max - min, min)
}

/// Normalize a whole feature triple into vector order
#[must_use]
pub fn normalize_features(features: &SleepFeatures) -> [f64; 3] {
    [
        normalize(features.avg_duration, FeatureKind::Duration),
        normalize(features.avg_quality, FeatureKind::Quality),
        normalize(features.consistency_score, FeatureKind::Consistency),
    ]
}
