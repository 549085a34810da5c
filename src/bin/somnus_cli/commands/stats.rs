// ABOUTME: Stats command for somnus-cli
// ABOUTME: Summarizes a synthetic training corpus and dumps predictor debug info
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

use anyhow::{Context, Result};
use serde_json::json;
use somnus::config::SomnusConfig;
use somnus::intelligence::statistics::TrainingDataStatistics;
use somnus::intelligence::{DiagnosticsConfig, SleepScorePredictor, TrainingDataGenerator};

use crate::helpers::display::{print_json, print_summary};
use crate::helpers::predictor::rng;

/// Print corpus statistics and the debug info of a predictor trained on it
pub async fn run(config: &SomnusConfig, count: usize, seed: Option<u64>) -> Result<()> {
    let corpus = TrainingDataGenerator::with_count(count).generate(&mut rng(seed));
    let statistics =
        TrainingDataStatistics::from_examples(&corpus).context("Training corpus is empty")?;

    let mut predictor = SleepScorePredictor::with_config(config.predictor.clone());
    predictor.set_diagnostics(DiagnosticsConfig {
        enabled: true,
        ..config.predictor.diagnostics
    });
    predictor.train(&corpus).await;
    predictor.mark_initialized();

    print_json(&json!({
        "trainingData": statistics,
        "predictor": predictor.debug_info(),
    }))?;
    print_summary(&format!(
        "{} examples, average score {:.1}",
        statistics.count, statistics.sleep_score.avg
    ));
    Ok(())
}
