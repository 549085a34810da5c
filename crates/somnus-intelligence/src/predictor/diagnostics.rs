// ABOUTME: Optional prediction diagnostics: performance counters and a bounded history ring buffer
// ABOUTME: Observability only; captured data never influences a returned prediction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

use super::confidence::ConfidenceLevel;
use crate::config::DiagnosticsConfig;
use crate::normalization::{FeatureKind, FeatureRange};
use serde::{Deserialize, Serialize};
use somnus_core::models::SleepFeatures;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One captured prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    /// Raw query features
    pub input: SleepFeatures,
    /// Predicted score
    pub output: Option<u8>,
    /// Neighbor count in effect
    pub k: usize,
    /// Raw confidence
    pub confidence: f64,
    /// Qualitative confidence
    pub confidence_level: ConfidenceLevel,
    /// Inference time (milliseconds)
    pub time_ms: f64,
}

/// Running prediction counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictorMetrics {
    /// Predictions attempted on an initialized model
    pub total_predictions: u64,
    /// Predictions that produced a score
    pub successful_predictions: u64,
    /// Predictions that ended in an error result
    pub failed_predictions: u64,
    /// Sum of successful inference times (milliseconds)
    pub total_prediction_time_ms: f64,
}

impl PredictorMetrics {
    /// Mean inference time of successful predictions; zero before the first one
    #[must_use]
    pub fn avg_prediction_time_ms(&self) -> f64 {
        if self.successful_predictions == 0 {
            0.0
        } else {
            self.total_prediction_time_ms / self.successful_predictions as f64
        }
    }
}

#[derive(Debug, Default)]
struct DiagnosticsState {
    metrics: PredictorMetrics,
    history: VecDeque<PredictionRecord>,
}

/// Interior-mutable diagnostics store so `predict` can take `&self`
#[derive(Debug)]
pub(crate) struct Diagnostics {
    config: DiagnosticsConfig,
    state: Mutex<DiagnosticsState>,
}

impl Diagnostics {
    pub(crate) fn new(config: DiagnosticsConfig) -> Self {
        Self {
            config,
            state: Mutex::new(DiagnosticsState::default()),
        }
    }

    pub(crate) const fn config(&self) -> DiagnosticsConfig {
        self.config
    }

    pub(crate) fn reconfigure(&mut self, config: DiagnosticsConfig) {
        self.config = config;
        if let Ok(state) = self.state.get_mut() {
            while state.history.len() > config.max_records {
                state.history.pop_front();
            }
        }
    }

    pub(crate) fn record_success(&self, record: PredictionRecord) {
        if !self.config.enabled || !self.config.track_performance {
            return;
        }
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.metrics.total_predictions += 1;
        state.metrics.successful_predictions += 1;
        state.metrics.total_prediction_time_ms += record.time_ms;

        if self.config.store_predictions && self.config.max_records > 0 {
            if state.history.len() >= self.config.max_records {
                state.history.pop_front();
            }
            state.history.push_back(record);
        }
    }

    pub(crate) fn record_failure(&self) {
        if !self.config.enabled || !self.config.track_performance {
            return;
        }
        if let Ok(mut state) = self.state.lock() {
            state.metrics.total_predictions += 1;
            state.metrics.failed_predictions += 1;
        }
    }

    pub(crate) fn snapshot(&self) -> (PredictorMetrics, Vec<PredictionRecord>) {
        self.state.lock().map_or_else(
            |_| (PredictorMetrics::default(), Vec::new()),
            |state| (state.metrics, state.history.iter().cloned().collect()),
        )
    }
}

/// Feature ranges keyed by name, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRanges {
    /// Duration range (hours)
    pub duration: FeatureRange,
    /// Quality range
    pub quality: FeatureRange,
    /// Consistency range
    pub consistency: FeatureRange,
}

impl Default for FeatureRanges {
    fn default() -> Self {
        Self {
            duration: FeatureKind::Duration.range(),
            quality: FeatureKind::Quality.range(),
            consistency: FeatureKind::Consistency.range(),
        }
    }
}

/// Snapshot of the predictor state for debugging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictorDebugInfo {
    /// Whether the initialization flag is set
    pub model_initialized: bool,
    /// Current neighbor count
    pub k: usize,
    /// Normalization ranges
    pub feature_ranges: FeatureRanges,
    /// Diagnostics configuration
    pub diagnostics: DiagnosticsConfig,
    /// Counters
    pub metrics: PredictorMetrics,
    /// Captured predictions, oldest first (`None` when storage is disabled)
    pub prediction_history: Option<Vec<PredictionRecord>>,
    /// Number of stored training examples
    pub support_set_size: usize,
    /// Mean inference time (milliseconds)
    pub avg_prediction_time_ms: f64,
}
