// ABOUTME: Predictor configuration: neighbor count, k search, confidence thresholds, diagnostics
// ABOUTME: Plain data with defaults from somnus-core constants; env loading lives in the root crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

use crate::predictor::ConfidenceThresholds;
use serde::{Deserialize, Serialize};
use somnus_core::constants::{diagnostics, knn};

/// Sleep score predictor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictorConfig {
    /// Neighbor count used until a k search runs
    pub default_k: usize,
    /// Candidates tried by the k search during initialization
    pub candidate_ks: Vec<usize>,
    /// Leading synthesized examples used as the k search test set
    pub optimization_sample_size: usize,
    /// Thresholds mapping confidence to a qualitative level
    pub thresholds: ConfidenceThresholds,
    /// Prediction diagnostics capture
    pub diagnostics: DiagnosticsConfig,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            default_k: knn::DEFAULT_K,
            candidate_ks: knn::INITIALIZATION_CANDIDATE_KS.to_vec(),
            optimization_sample_size: knn::OPTIMIZATION_SAMPLE_SIZE,
            thresholds: ConfidenceThresholds::default(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

/// Controls the in-memory prediction diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsConfig {
    /// Master switch; nothing is captured while disabled
    pub enabled: bool,
    /// Keep a bounded history of individual predictions
    pub store_predictions: bool,
    /// Count predictions and accumulate inference time
    pub track_performance: bool,
    /// Ring buffer capacity for the prediction history
    pub max_records: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            store_predictions: true,
            track_performance: true,
            max_records: diagnostics::MAX_RECORDS,
        }
    }
}

impl DiagnosticsConfig {
    /// Default configuration with capture switched on
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}
