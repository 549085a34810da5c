// ABOUTME: Sleep score prediction engine for the Somnus workspace
// ABOUTME: KNN regressor over normalized sleep features with confidence-gated formula fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

#![deny(unsafe_code)]

//! # Somnus Intelligence
//!
//! Maps a user's recent sleep statistics (average duration, average quality,
//! consistency) to a 0-100 sleep score.
//!
//! - **normalization**: fixed-range affine rescaling of the three features
//! - **training_data**: archetype-driven synthetic corpus plus fixed edge cases
//! - **predictor**: k-nearest-neighbors voting, confidence levels, k search, diagnostics
//! - **fallback**: deterministic closed-form score used when the predictor is untrustworthy
//! - **statistics**: summary statistics of a training corpus

/// Predictor configuration
pub mod config;

/// Closed-form sleep score used when a prediction cannot be trusted
pub mod fallback;

/// Feature normalization to and from the unit interval
pub mod normalization;

/// KNN sleep score predictor
pub mod predictor;

/// Training corpus summary statistics
pub mod statistics;

/// Synthetic training data generation
pub mod training_data;

pub use config::{DiagnosticsConfig, PredictorConfig};
pub use fallback::FallbackScore;
pub use normalization::{denormalize, normalize, FeatureKind, FeatureRange};
pub use predictor::{
    ConfidenceLevel, ConfidenceThresholds, KEvaluation, KOptimizationResult, PredictionResult,
    SleepScorePredictor,
};
pub use training_data::{TrainingDataGenerator, TrainingExample};
