// ABOUTME: Confidence levels for KNN predictions and their human-readable messages
// ABOUTME: Boundary-inclusive thresholds: >=0.75 high, >=0.45 medium, >=0.25 low, else very low
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

use serde::{Deserialize, Serialize};
use somnus_core::constants::confidence;
use std::fmt;

/// Lower bounds (inclusive) of each qualitative confidence level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    /// At or above: high
    pub high: f64,
    /// At or above: medium
    pub medium: f64,
    /// At or above: low
    pub low: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: confidence::HIGH_THRESHOLD,
            medium: confidence::MEDIUM_THRESHOLD,
            low: confidence::LOW_THRESHOLD,
        }
    }
}

impl ConfidenceThresholds {
    /// Qualitative level of a raw confidence in `[0, 1]`
    #[must_use]
    pub fn level_for(&self, confidence: f64) -> ConfidenceLevel {
        if confidence >= self.high {
            ConfidenceLevel::High
        } else if confidence >= self.medium {
            ConfidenceLevel::Medium
        } else if confidence >= self.low {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }
}

/// Qualitative reliability of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// Most neighbors agree
    High,
    /// A clear plurality agrees
    Medium,
    /// Weak agreement; callers may prefer the formula
    Low,
    /// Too little agreement to trust
    #[serde(rename = "very low")]
    VeryLow,
    /// The model has not been initialized
    None,
    /// Prediction failed
    Error,
}

impl ConfidenceLevel {
    /// Whether a caller may show the predicted score instead of the formula score
    #[must_use]
    pub const fn is_trustworthy(self) -> bool {
        matches!(self, Self::High | Self::Medium | Self::Low)
    }

    /// Message describing a successful prediction at this level
    #[must_use]
    pub fn message(self, confidence: f64) -> String {
        let percentage = (confidence * 100.0).round() as u32;
        match self {
            Self::High => format!("High confidence prediction ({percentage}%)"),
            Self::Medium => format!("Moderate confidence prediction ({percentage}%)"),
            Self::Low => format!(
                "Low confidence prediction ({percentage}%). Consider using traditional calculation."
            ),
            Self::VeryLow => {
                format!("Very low confidence ({percentage}%). Results may not be reliable.")
            }
            Self::None => "Model not initialized".to_owned(),
            Self::Error => "Error occurred during prediction.".to_owned(),
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::VeryLow => "very low",
            Self::None => "none",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}
