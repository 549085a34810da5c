// ABOUTME: KNN sleep score predictor with confidence levels, k search, and diagnostics
// ABOUTME: Caller-owned model: support set of normalized examples plus a neighbor count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

//! # Sleep Score Predictor
//!
//! A k-nearest-neighbors estimator mapping (average duration, average quality,
//! consistency) to a 0-100 sleep score. Each prediction carries the share of
//! neighbors that agreed with the winning score and a qualitative confidence
//! level; callers are expected to fall back to [`crate::fallback::FallbackScore`]
//! when the level is not trustworthy.
//!
//! ## Lifecycle
//!
//! The model starts *uninitialized*. [`SleepScorePredictor::train`] only appends
//! to the support set; the initialized flag is raised separately by
//! [`SleepScorePredictor::mark_initialized`] or by
//! [`SleepScorePredictor::initialize`], which also synthesizes the corpus and
//! tunes `k`. Initializing twice is a no-op.
//!
//! Predictions never fail: an uninitialized model yields a `none` result and
//! computation failures yield an `error` result.
//!
//! The neighbor scan runs on the blocking pool, so a caller racing a
//! prediction against a timer regains control while the scan is in flight.

mod confidence;
mod diagnostics;
/// Support-set storage and neighbor voting
pub mod knn;
mod optimizer;

pub use confidence::{ConfidenceLevel, ConfidenceThresholds};
pub use diagnostics::{FeatureRanges, PredictionRecord, PredictorDebugInfo, PredictorMetrics};
pub use optimizer::{KEvaluation, KOptimizationResult};

use crate::config::{DiagnosticsConfig, PredictorConfig};
use crate::normalization::{denormalize, normalize_features, FeatureKind};
use crate::training_data::{round_score, TrainingDataGenerator, TrainingExample};
use diagnostics::Diagnostics;
use knn::{nearest_vote, PredictionError, SupportExample, Vote};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use somnus_core::constants::{feature_ranges, knn as knn_defaults};
use somnus_core::models::SleepFeatures;
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, error, info, warn};

/// Examples ingested between cooperative yields during training
const TRAIN_BATCH_SIZE: usize = 256;

/// Outcome of a single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Predicted score (0-100), absent for `none` and `error` results
    pub score: Option<u8>,
    /// Share of neighbors agreeing with the score
    pub confidence: f64,
    /// Qualitative confidence
    pub confidence_level: ConfidenceLevel,
    /// Human-readable summary
    pub message: String,
    /// Inference time (milliseconds)
    pub prediction_time_ms: f64,
}

impl PredictionResult {
    fn not_initialized() -> Self {
        Self {
            score: None,
            confidence: 0.0,
            confidence_level: ConfidenceLevel::None,
            message: ConfidenceLevel::None.message(0.0),
            prediction_time_ms: 0.0,
        }
    }

    fn failure(err: &PredictionError) -> Self {
        Self {
            score: None,
            confidence: 0.0,
            confidence_level: ConfidenceLevel::Error,
            message: format!("Prediction error: {err}"),
            prediction_time_ms: 0.0,
        }
    }

    /// Whether the score may be shown instead of the formula fallback
    #[must_use]
    pub const fn is_trustworthy(&self) -> bool {
        self.score.is_some() && self.confidence_level.is_trustworthy()
    }
}

/// KNN sleep score predictor
#[derive(Debug)]
pub struct SleepScorePredictor {
    support: Arc<Vec<SupportExample>>,
    k: usize,
    initialized: bool,
    config: PredictorConfig,
    diagnostics: Diagnostics,
}

impl Default for SleepScorePredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl SleepScorePredictor {
    /// Uninitialized predictor with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PredictorConfig::default())
    }

    /// Uninitialized predictor with the given configuration
    ///
    /// A zero `default_k` is replaced by the built-in default.
    #[must_use]
    pub fn with_config(config: PredictorConfig) -> Self {
        let k = if config.default_k > 0 {
            config.default_k
        } else {
            knn_defaults::DEFAULT_K
        };
        Self {
            support: Arc::default(),
            k,
            initialized: false,
            diagnostics: Diagnostics::new(config.diagnostics),
            config,
        }
    }

    /// Current neighbor count
    #[must_use]
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Whether the initialized flag is set
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of stored training examples
    #[must_use]
    pub fn support_set_size(&self) -> usize {
        self.support.len()
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Set the neighbor count; returns `false` and leaves `k` unchanged for zero
    pub fn set_k(&mut self, k: usize) -> bool {
        if k == 0 {
            warn!(k, "Invalid k value, must be a positive integer");
            return false;
        }
        self.k = k;
        debug!(k, "Number of neighbors set");
        true
    }

    /// Replace the diagnostics configuration, trimming stored history to the new capacity
    pub fn set_diagnostics(&mut self, config: DiagnosticsConfig) {
        self.config.diagnostics = config;
        self.diagnostics.reconfigure(config);
        debug!(?config, "Diagnostics configuration updated");
    }

    /// Append `examples` to the support set
    ///
    /// Does not touch the initialized flag, so re-training is possible without a reset.
    pub async fn train(&mut self, examples: &[TrainingExample]) {
        if examples.is_empty() {
            return;
        }

        // Copies only if a scan still holds the previous support set
        let support = Arc::make_mut(&mut self.support);
        support.reserve(examples.len());
        for batch in examples.chunks(TRAIN_BATCH_SIZE) {
            support.extend(batch.iter().map(|example| SupportExample {
                features: normalize_features(&example.features()),
                score: example.sleep_score,
            }));
            task::yield_now().await;
        }

        info!(
            examples = examples.len(),
            support_set_size = self.support.len(),
            "KNN model trained"
        );
    }

    /// Raise the initialized flag; refused while the support set is empty
    pub fn mark_initialized(&mut self) -> bool {
        if self.support.is_empty() {
            warn!("Refusing to mark an empty model as initialized");
            return false;
        }
        self.initialized = true;
        true
    }

    /// Synthesize a corpus from the system random source, train, and tune `k`
    pub async fn initialize(&mut self) {
        let mut rng = StdRng::from_entropy();
        self.initialize_with_rng(&mut rng).await;
    }

    /// Synthesize a corpus from `rng`, train, and tune `k`
    ///
    /// No-op when already initialized. The k search runs over the leading
    /// `optimization_sample_size` synthesized examples.
    pub async fn initialize_with_rng<R: Rng + Send + ?Sized>(&mut self, rng: &mut R) {
        if self.initialized {
            return;
        }

        let training_data = TrainingDataGenerator::default().generate(rng);
        self.train(&training_data).await;
        if !self.mark_initialized() {
            return;
        }

        let sample_len = self.config.optimization_sample_size.min(training_data.len());
        let candidates = self.config.candidate_ks.clone();
        if self
            .optimize_k(&training_data[..sample_len], &candidates)
            .await
            .is_none()
        {
            warn!("k search skipped, keeping k={}", self.k);
        }

        info!(
            examples = training_data.len(),
            k = self.k,
            "Sleep score predictor initialized"
        );
    }

    /// Predict a sleep score from the three raw features
    pub async fn predict(
        &self,
        avg_duration: f64,
        avg_quality: f64,
        consistency_score: f64,
    ) -> PredictionResult {
        self.predict_features(&SleepFeatures::new(
            avg_duration,
            avg_quality,
            consistency_score,
        ))
        .await
    }

    /// Predict a sleep score from a feature triple
    pub async fn predict_features(&self, features: &SleepFeatures) -> PredictionResult {
        if !self.initialized {
            warn!("KNN model not initialized, returning empty prediction");
            return PredictionResult::not_initialized();
        }

        let started = Instant::now();
        let vote = match self.classify(features).await {
            Ok(vote) => vote,
            Err(err) => {
                error!(error = %err, "Error predicting sleep score");
                self.diagnostics.record_failure();
                return PredictionResult::failure(&err);
            }
        };
        let prediction_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        let score = round_score(denormalize(
            vote.label,
            feature_ranges::SCORE_MIN,
            feature_ranges::SCORE_MAX,
        ));
        let confidence_level = self.config.thresholds.level_for(vote.confidence);

        self.diagnostics.record_success(PredictionRecord {
            input: *features,
            output: Some(score),
            k: self.k,
            confidence: vote.confidence,
            confidence_level,
            time_ms: prediction_time_ms,
        });

        PredictionResult {
            score: Some(score),
            confidence: vote.confidence,
            confidence_level,
            message: confidence_level.message(vote.confidence),
            prediction_time_ms,
        }
    }

    async fn classify(&self, features: &SleepFeatures) -> Result<Vote, PredictionError> {
        let raw = [
            features.avg_duration,
            features.avg_quality,
            features.consistency_score,
        ];
        if let Some((kind, value)) = FeatureKind::ALL
            .into_iter()
            .zip(raw)
            .find(|(_, value)| !value.is_finite())
        {
            return Err(PredictionError::NonFiniteFeature {
                feature: kind.as_str(),
                value,
            });
        }

        let support = Arc::clone(&self.support);
        let query = normalize_features(features);
        let k = self.k;
        task::spawn_blocking(move || nearest_vote(&support, &query, k))
            .await
            .map_err(|err| PredictionError::SearchAborted(err.to_string()))?
    }

    /// Snapshot of model state and captured diagnostics
    #[must_use]
    pub fn debug_info(&self) -> PredictorDebugInfo {
        let config = self.diagnostics.config();
        let (metrics, history) = self.diagnostics.snapshot();
        PredictorDebugInfo {
            model_initialized: self.initialized,
            k: self.k,
            feature_ranges: FeatureRanges::default(),
            diagnostics: config,
            avg_prediction_time_ms: metrics.avg_prediction_time_ms(),
            metrics,
            prediction_history: config.store_predictions.then_some(history),
            support_set_size: self.support.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training_data::EDGE_CASE_EXAMPLES;

    #[tokio::test]
    async fn test_uninitialized_predicts_none() {
        let predictor = SleepScorePredictor::new();
        let result = predictor.predict(8.0, 80.0, 18.0).await;
        assert_eq!(result.score, None);
        assert_eq!(result.confidence_level, ConfidenceLevel::None);
        assert_eq!(result.message, "Model not initialized");
        assert!(result.confidence.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_train_does_not_raise_flag() {
        let mut predictor = SleepScorePredictor::new();
        predictor.train(&EDGE_CASE_EXAMPLES).await;
        assert_eq!(predictor.support_set_size(), 4);
        assert!(!predictor.is_initialized());
        assert_eq!(
            predictor.predict(8.0, 95.0, 19.0).await.confidence_level,
            ConfidenceLevel::None
        );
    }

    #[tokio::test]
    async fn test_exact_match_with_k1() {
        let mut predictor = SleepScorePredictor::new();
        predictor.train(&EDGE_CASE_EXAMPLES).await;
        assert!(predictor.mark_initialized());
        assert!(predictor.set_k(1));

        let result = predictor.predict(8.0, 95.0, 19.0).await;
        assert_eq!(result.score, Some(98));
        assert!((result.confidence - 1.0).abs() < f64::EPSILON);
        assert_eq!(result.confidence_level, ConfidenceLevel::High);
        assert_eq!(result.message, "High confidence prediction (100%)");
    }

    #[tokio::test]
    async fn test_non_finite_input_is_error_result() {
        let mut predictor = SleepScorePredictor::new();
        predictor.train(&EDGE_CASE_EXAMPLES).await;
        predictor.mark_initialized();

        let result = predictor.predict(f64::NAN, 80.0, 10.0).await;
        assert_eq!(result.score, None);
        assert_eq!(result.confidence_level, ConfidenceLevel::Error);
        assert!(result.message.starts_with("Prediction error: duration"));
    }

    #[tokio::test]
    async fn test_result_serializes_camel_case() {
        let mut predictor = SleepScorePredictor::new();
        predictor.train(&EDGE_CASE_EXAMPLES).await;
        predictor.mark_initialized();

        let json = serde_json::to_value(predictor.predict(8.0, 95.0, 19.0).await).unwrap();
        assert!(json["confidenceLevel"].is_string());
        assert!(json["predictionTimeMs"].is_number());
        assert!(json.get("confidence_level").is_none());

        let debug = serde_json::to_value(predictor.debug_info()).unwrap();
        assert_eq!(debug["modelInitialized"], true);
        assert_eq!(debug["supportSetSize"], 4);
    }

    #[test]
    fn test_set_k_rejects_zero() {
        let mut predictor = SleepScorePredictor::new();
        assert!(!predictor.set_k(0));
        assert_eq!(predictor.k(), knn_defaults::DEFAULT_K);
        assert!(predictor.set_k(7));
        assert_eq!(predictor.k(), 7);
    }

    #[test]
    fn test_mark_initialized_requires_examples() {
        let mut predictor = SleepScorePredictor::new();
        assert!(!predictor.mark_initialized());
        assert!(!predictor.is_initialized());
    }

    #[test]
    fn test_zero_default_k_falls_back() {
        let predictor = SleepScorePredictor::with_config(PredictorConfig {
            default_k: 0,
            ..PredictorConfig::default()
        });
        assert_eq!(predictor.k(), knn_defaults::DEFAULT_K);
    }
}
