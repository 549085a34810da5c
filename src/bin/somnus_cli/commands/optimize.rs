// ABOUTME: Optimize command for somnus-cli
// ABOUTME: Evaluates candidate neighbor counts against a fresh synthetic test set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

use anyhow::{bail, Result};
use serde_json::json;
use somnus::config::SomnusConfig;
use somnus::constants::knn;
use somnus::intelligence::TrainingDataGenerator;
use somnus::logging::AppLogger;
use std::time::Instant;

use crate::helpers::display::{print_json, print_summary};
use crate::helpers::predictor::{initialized, rng};

/// Run a k search and print every candidate's evaluation
pub async fn run(
    config: &SomnusConfig,
    candidates: Option<Vec<usize>>,
    sample: usize,
    seed: Option<u64>,
) -> Result<()> {
    let candidates = candidates.unwrap_or_else(|| knn::DEFAULT_CANDIDATE_KS.to_vec());
    let mut predictor = initialized(&config.predictor, seed).await;

    // Offset the seed so the test set differs from the training corpus
    let mut test_rng = rng(seed.map(|s| s.wrapping_add(1)));
    let test_set = TrainingDataGenerator::with_count(sample).generate(&mut test_rng);

    let started = Instant::now();
    let Some(result) = predictor.optimize_k(&test_set, &candidates).await else {
        bail!("k search produced no result (need at least one positive candidate)");
    };
    AppLogger::log_performance_metric(
        "knn.optimize_k",
        started.elapsed().as_secs_f64() * 1000.0,
        "ms",
        Some(&json!({ "candidates": candidates.len(), "testExamples": test_set.len() })),
    );

    print_json(&result)?;
    print_summary(&format!(
        "Best k = {} (mean absolute error {:.2} over {} examples)",
        result.best_k,
        result.lowest_error,
        test_set.len()
    ));
    Ok(())
}
