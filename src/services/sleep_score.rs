// ABOUTME: Sleep score service: weekly aggregation, predictor call, and confidence-gated fallback
// ABOUTME: Always produces a score; untrustworthy predictions fall back to the closed-form formula
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

//! # Sleep Score Service
//!
//! The caller side of the predictor contract. Recent sleep entries are reduced
//! to [`WeeklySleepStats`], the predictor is asked for a score under a time
//! budget, and the answer is kept only when its confidence level is `high`,
//! `medium`, or `low`. Every other outcome (very low confidence, an
//! uninitialized model, an error result, a failed call, or an expired budget)
//! yields the [`FallbackScore`] instead.

use crate::config::ServiceConfig;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{SleepEntry, SleepFeatures};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use somnus_intelligence::fallback::{consistency_points, population_std_dev};
use somnus_intelligence::{
    ConfidenceLevel, FallbackScore, PredictionResult, PredictorConfig, SleepScorePredictor,
};
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::debug;

/// KNN predictor shared between the service and whoever trains or inspects it
pub type SharedPredictor = Arc<RwLock<SleepScorePredictor>>;

/// Aggregated statistics over the most recent sleep entries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySleepStats {
    /// Number of entries aggregated
    pub entries: usize,
    /// Mean sleep duration (hours)
    pub avg_duration: f64,
    /// Mean quality (0-100)
    pub avg_quality: f64,
    /// Population standard deviation of durations (hours)
    pub duration_std_dev: f64,
    /// Mean number of interruptions per night
    pub avg_interruptions: f64,
    /// Bucketed consistency score (0-20) derived from the deviation
    pub consistency_score: f64,
}

impl WeeklySleepStats {
    /// Aggregate the `window` most recent entries by date
    ///
    /// Entries sharing a date keep their input order.
    ///
    /// # Errors
    ///
    /// Returns `AppError` when `entries` is empty, `window` is zero, or an
    /// entry fails validation
    pub fn from_entries(entries: &[SleepEntry], window: usize) -> AppResult<Self> {
        if entries.is_empty() {
            return Err(AppError::invalid_input(
                "At least one sleep entry is required to calculate a score",
            ));
        }
        if window == 0 {
            return Err(AppError::invalid_input("Score window must be at least 1 day"));
        }
        for entry in entries {
            entry.validate()?;
        }

        let mut recent: Vec<&SleepEntry> = entries.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(window);

        let count = recent.len() as f64;
        let durations: Vec<f64> = recent.iter().map(|entry| entry.sleep_duration).collect();
        let duration_std_dev = population_std_dev(&durations);

        Ok(Self {
            entries: recent.len(),
            avg_duration: durations.iter().sum::<f64>() / count,
            avg_quality: recent.iter().map(|entry| entry.quality).sum::<f64>() / count,
            duration_std_dev,
            avg_interruptions: recent
                .iter()
                .map(|entry| f64::from(entry.interruptions))
                .sum::<f64>()
                / count,
            consistency_score: consistency_points(duration_std_dev),
        })
    }

    /// Feature triple fed to the predictor
    #[must_use]
    pub const fn features(&self) -> SleepFeatures {
        SleepFeatures::new(self.avg_duration, self.avg_quality, self.consistency_score)
    }

    /// Closed-form score for these statistics
    #[must_use]
    pub fn fallback_score(&self) -> FallbackScore {
        FallbackScore::calculate(self.avg_duration, self.avg_quality, self.duration_std_dev)
    }
}

/// Async seam between the service and a score predictor
#[async_trait]
pub trait ScorePredictor: Send + Sync {
    /// Predict a score for the given features
    ///
    /// # Errors
    ///
    /// Implementations return `AppError` when the predictor cannot be reached
    async fn predict(&self, features: &SleepFeatures) -> AppResult<PredictionResult>;
}

#[async_trait]
impl ScorePredictor for RwLock<SleepScorePredictor> {
    async fn predict(&self, features: &SleepFeatures) -> AppResult<PredictionResult> {
        let predictor = self.read().await;
        Ok(predictor.predict_features(features).await)
    }
}

/// Where the reported score came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreSource {
    /// KNN prediction with acceptable confidence
    AiPrediction,
    /// Closed-form fallback formula
    StandardCalculation,
}

impl ScoreSource {
    /// Badge text shown next to the score
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::AiPrediction => "AI Prediction",
            Self::StandardCalculation => "Standard Calculation",
        }
    }
}

impl Display for ScoreSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::AiPrediction => write!(f, "aiPrediction"),
            Self::StandardCalculation => write!(f, "standardCalculation"),
        }
    }
}

/// Why the predictor's answer was not used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackReason {
    /// Confidence below the `low` threshold
    LowConfidence,
    /// The model has not been initialized
    ModelNotInitialized,
    /// The predictor returned an `error` result
    PredictionError,
    /// The predictor call itself failed
    PredictorUnavailable,
    /// The predictor did not answer within the time budget
    Timeout,
}

impl FallbackReason {
    /// Reason to reject `prediction`, or `None` when it can be shown
    #[must_use]
    pub const fn for_prediction(prediction: &PredictionResult) -> Option<Self> {
        if prediction.is_trustworthy() {
            return None;
        }
        Some(match prediction.confidence_level {
            ConfidenceLevel::VeryLow => Self::LowConfidence,
            ConfidenceLevel::None => Self::ModelNotInitialized,
            ConfidenceLevel::High
            | ConfidenceLevel::Medium
            | ConfidenceLevel::Low
            | ConfidenceLevel::Error => Self::PredictionError,
        })
    }
}

impl Display for FallbackReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowConfidence => write!(f, "lowConfidence"),
            Self::ModelNotInitialized => write!(f, "modelNotInitialized"),
            Self::PredictionError => write!(f, "predictionError"),
            Self::PredictorUnavailable => write!(f, "predictorUnavailable"),
            Self::Timeout => write!(f, "timeout"),
        }
    }
}

/// Score handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepScoreReport {
    /// Final score (0-100)
    pub score: u8,
    /// Origin of `score`
    pub source: ScoreSource,
    /// Raw predictor answer, when one arrived
    pub prediction: Option<PredictionResult>,
    /// Formula breakdown, present when the fallback was used
    pub fallback: Option<FallbackScore>,
    /// Why the fallback was used
    pub fallback_reason: Option<FallbackReason>,
    /// Aggregated input statistics
    pub stats: WeeklySleepStats,
}

/// Computes sleep scores from recent entries
#[derive(Clone)]
pub struct SleepScoreService {
    predictor: Arc<dyn ScorePredictor>,
    config: ServiceConfig,
}

impl SleepScoreService {
    /// Create a service around any predictor
    #[must_use]
    pub fn new(predictor: Arc<dyn ScorePredictor>, config: ServiceConfig) -> Self {
        Self { predictor, config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Calculate a score for the most recent entries
    ///
    /// # Errors
    ///
    /// Returns `AppError` only when the entries cannot be aggregated; once
    /// statistics exist a score is always produced
    pub async fn calculate(&self, entries: &[SleepEntry]) -> AppResult<SleepScoreReport> {
        let started = Instant::now();
        let stats = WeeklySleepStats::from_entries(entries, self.config.window_days)?;
        let features = stats.features();
        debug!(
            entries = stats.entries,
            avg_duration = features.avg_duration,
            avg_quality = features.avg_quality,
            consistency_score = features.consistency_score,
            "Aggregated weekly sleep statistics"
        );

        let (prediction, reason) = match timeout(
            self.config.prediction_timeout(),
            self.predictor.predict(&features),
        )
        .await
        {
            Ok(Ok(prediction)) => {
                let reason = FallbackReason::for_prediction(&prediction);
                if let Some(reason) = reason {
                    AppLogger::log_fallback(&reason.to_string(), Some(&prediction.message));
                }
                (Some(prediction), reason)
            }
            Ok(Err(err)) => {
                let details = err.to_string();
                AppLogger::log_fallback(
                    &FallbackReason::PredictorUnavailable.to_string(),
                    Some(&details),
                );
                (None, Some(FallbackReason::PredictorUnavailable))
            }
            Err(_) => {
                let details =
                    AppError::prediction_timeout(self.config.prediction_timeout_ms).to_string();
                AppLogger::log_fallback(&FallbackReason::Timeout.to_string(), Some(&details));
                (None, Some(FallbackReason::Timeout))
            }
        };

        let report = match (reason, prediction.as_ref().and_then(|p| p.score)) {
            (None, Some(score)) => SleepScoreReport {
                score,
                source: ScoreSource::AiPrediction,
                prediction,
                fallback: None,
                fallback_reason: None,
                stats,
            },
            (reason, _) => {
                let fallback = stats.fallback_score();
                SleepScoreReport {
                    score: fallback.total,
                    source: ScoreSource::StandardCalculation,
                    prediction,
                    fallback: Some(fallback),
                    fallback_reason: reason.or(Some(FallbackReason::PredictionError)),
                    stats,
                }
            }
        };

        AppLogger::log_score_event(
            &report.source.to_string(),
            report.score,
            stats.entries,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(report)
    }
}

/// Build a predictor, run its initialization routine, and wrap it for sharing
pub async fn initialize_predictor(config: PredictorConfig) -> SharedPredictor {
    let mut predictor = SleepScorePredictor::with_config(config);
    predictor.initialize().await;
    Arc::new(RwLock::new(predictor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(day: u32, hours: f64, quality: f64) -> SleepEntry {
        SleepEntry {
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            sleep_duration: hours,
            quality,
            interruptions: 1,
        }
    }

    #[test]
    fn test_stats_use_most_recent_window() {
        let entries: Vec<SleepEntry> = (1..=10)
            .map(|day| entry(day, if day > 3 { 8.0 } else { 4.0 }, 80.0))
            .collect();

        let stats = WeeklySleepStats::from_entries(&entries, 7).unwrap();
        assert_eq!(stats.entries, 7);
        assert!((stats.avg_duration - 8.0).abs() < f64::EPSILON);
        assert!(stats.duration_std_dev.abs() < f64::EPSILON);
        assert!((stats.consistency_score - 20.0).abs() < f64::EPSILON);
        assert!((stats.avg_interruptions - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_entries_rejected() {
        assert!(WeeklySleepStats::from_entries(&[], 7).is_err());
    }

    #[test]
    fn test_invalid_entry_rejected() {
        let entries = [entry(1, 7.0, 140.0)];
        assert!(WeeklySleepStats::from_entries(&entries, 7).is_err());
    }

    #[test]
    fn test_fallback_reason_mapping() {
        let prediction = |level, score| PredictionResult {
            score,
            confidence: 0.1,
            confidence_level: level,
            message: String::new(),
            prediction_time_ms: 0.0,
        };
        assert_eq!(
            FallbackReason::for_prediction(&prediction(ConfidenceLevel::Low, Some(60))),
            None
        );
        assert_eq!(
            FallbackReason::for_prediction(&prediction(ConfidenceLevel::VeryLow, Some(60))),
            Some(FallbackReason::LowConfidence)
        );
        assert_eq!(
            FallbackReason::for_prediction(&prediction(ConfidenceLevel::None, None)),
            Some(FallbackReason::ModelNotInitialized)
        );
        assert_eq!(
            FallbackReason::for_prediction(&prediction(ConfidenceLevel::Error, None)),
            Some(FallbackReason::PredictionError)
        );
    }

    #[test]
    fn test_source_serialization() {
        assert_eq!(
            serde_json::to_string(&ScoreSource::AiPrediction).unwrap(),
            "\"aiPrediction\""
        );
        assert_eq!(ScoreSource::StandardCalculation.badge(), "Standard Calculation");
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let stats = WeeklySleepStats::from_entries(&[entry(1, 8.0, 80.0)], 7).unwrap();
        let report = SleepScoreReport {
            score: stats.fallback_score().total,
            source: ScoreSource::StandardCalculation,
            prediction: None,
            fallback: Some(stats.fallback_score()),
            fallback_reason: Some(FallbackReason::ModelNotInitialized),
            stats,
        };
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["source"], "standardCalculation");
        assert_eq!(json["fallbackReason"], "modelNotInitialized");
        assert_eq!(json["fallback"]["durationScore"], 40.0);
        assert_eq!(json["stats"]["avgDuration"], 8.0);
        assert!(json["stats"].get("duration_std_dev").is_none());
        assert!(json["stats"]["durationStdDev"].is_number());
    }
}
