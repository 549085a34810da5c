// ABOUTME: Summary statistics for a sleep score training corpus
// ABOUTME: Per-field min/max/mean and coarse four-bucket distributions for debug reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

use crate::training_data::TrainingExample;
use serde::{Deserialize, Serialize};
use std::iter;

/// Upper bounds (exclusive) and labels for duration buckets
const DURATION_BUCKETS: [(f64, &str); 3] = [(5.0, "3-5"), (7.0, "5-7"), (9.0, "7-9")];
/// Label for durations beyond the last bucket
const DURATION_OVERFLOW: &str = "9+";
/// Buckets shared by quality and score
const PERCENT_BUCKETS: [(f64, &str); 3] = [(25.0, "0-25"), (50.0, "25-50"), (75.0, "50-75")];
/// Label for percentages beyond the last bucket
const PERCENT_OVERFLOW: &str = "75-100";
/// Buckets for the 0-20 consistency score
const CONSISTENCY_BUCKETS: [(f64, &str); 3] = [(5.0, "0-5"), (10.0, "5-10"), (15.0, "10-15")];
/// Label for consistency beyond the last bucket
const CONSISTENCY_OVERFLOW: &str = "15-20";

/// Count of values falling in one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionBucket {
    /// Human-readable bucket range
    pub label: String,
    /// Number of values in the bucket
    pub count: usize,
}

/// Statistics of a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStatistics {
    /// Smallest observed value
    pub min: f64,
    /// Largest observed value
    pub max: f64,
    /// Arithmetic mean
    pub avg: f64,
    /// Bucketed counts, in ascending bucket order
    pub distribution: Vec<DistributionBucket>,
}

impl FieldStatistics {
    fn from_values(values: &[f64], buckets: &[(f64, &str)], overflow: &str) -> Self {
        let mut distribution: Vec<DistributionBucket> = buckets
            .iter()
            .map(|(_, label)| (*label).to_owned())
            .chain(iter::once(overflow.to_owned()))
            .map(|label| DistributionBucket { label, count: 0 })
            .collect();

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &value in values {
            min = min.min(value);
            max = max.max(value);
            sum += value;
            let slot = buckets
                .iter()
                .position(|(upper, _)| value < *upper)
                .unwrap_or(buckets.len());
            distribution[slot].count += 1;
        }

        Self {
            min,
            max,
            avg: sum / values.len() as f64,
            distribution,
        }
    }
}

/// Statistics of a whole training corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingDataStatistics {
    /// Number of examples
    pub count: usize,
    /// Average sleep duration field
    pub avg_duration: FieldStatistics,
    /// Average quality field
    pub avg_quality: FieldStatistics,
    /// Consistency score field
    pub consistency_score: FieldStatistics,
    /// Sleep score label
    pub sleep_score: FieldStatistics,
}

impl TrainingDataStatistics {
    /// Summarize `examples`; `None` for an empty corpus
    #[must_use]
    pub fn from_examples(examples: &[TrainingExample]) -> Option<Self> {
        if examples.is_empty() {
            return None;
        }

        let column = |f: fn(&TrainingExample) -> f64| examples.iter().map(f).collect::<Vec<_>>();

        Some(Self {
            count: examples.len(),
            avg_duration: FieldStatistics::from_values(
                &column(|e| e.avg_duration),
                &DURATION_BUCKETS,
                DURATION_OVERFLOW,
            ),
            avg_quality: FieldStatistics::from_values(
                &column(|e| e.avg_quality),
                &PERCENT_BUCKETS,
                PERCENT_OVERFLOW,
            ),
            consistency_score: FieldStatistics::from_values(
                &column(|e| e.consistency_score),
                &CONSISTENCY_BUCKETS,
                CONSISTENCY_OVERFLOW,
            ),
            sleep_score: FieldStatistics::from_values(
                &column(|e| f64::from(e.sleep_score)),
                &PERCENT_BUCKETS,
                PERCENT_OVERFLOW,
            ),
        })
    }

    /// Compact JSON rendering for log lines
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
