// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides seeded predictors, sleep entry fixtures, and scripted predictor doubles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `somnus`

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use somnus::errors::{AppError, AppResult};
use somnus::intelligence::{ConfidenceLevel, PredictionResult, SleepScorePredictor};
use somnus::models::{SleepEntry, SleepFeatures};
use somnus::services::{ScorePredictor, SharedPredictor};
use std::env;
use std::sync::{Arc, Once};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN, // Default to WARN for quiet tests
        };

        // Another test binary may have installed a subscriber already
        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Predictor trained on a seeded synthetic corpus
pub async fn seeded_predictor(seed: u64) -> SleepScorePredictor {
    init_test_logging();
    let mut predictor = SleepScorePredictor::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    predictor.initialize_with_rng(&mut rng).await;
    predictor
}

/// Seeded predictor wrapped for the score service
pub async fn shared_predictor(seed: u64) -> SharedPredictor {
    Arc::new(RwLock::new(seeded_predictor(seed).await))
}

/// One entry per night starting at `start`, cycling through `hours`
pub fn nightly_entries(start: NaiveDate, hours: &[f64], quality: f64) -> Vec<SleepEntry> {
    hours
        .iter()
        .enumerate()
        .map(|(night, &sleep_duration)| SleepEntry {
            date: start + Days::new(night as u64),
            sleep_duration,
            quality,
            interruptions: 1,
        })
        .collect()
}

/// First of March 2025
pub fn march_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

/// Prediction result with the given level and score
pub fn prediction(level: ConfidenceLevel, score: Option<u8>, confidence: f64) -> PredictionResult {
    PredictionResult {
        score,
        confidence,
        confidence_level: level,
        message: level.message(confidence),
        prediction_time_ms: 0.1,
    }
}

/// Scripted predictor double
pub enum ScriptedPredictor {
    /// Always returns this result
    Returns(PredictionResult),
    /// Always fails
    Fails,
    /// Sleeps before answering with a high-confidence 99
    Stalls(Duration),
}

#[async_trait]
impl ScorePredictor for ScriptedPredictor {
    async fn predict(&self, _features: &SleepFeatures) -> AppResult<PredictionResult> {
        match self {
            Self::Returns(result) => Ok(result.clone()),
            Self::Fails => Err(AppError::prediction_unavailable("backend offline")),
            Self::Stalls(delay) => {
                sleep(*delay).await;
                Ok(prediction(ConfidenceLevel::High, Some(99), 1.0))
            }
        }
    }
}
