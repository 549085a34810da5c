// ABOUTME: Predict command for somnus-cli
// ABOUTME: Runs a single KNN prediction from weekly averages and prints the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

use anyhow::{bail, Result};
use somnus::config::SomnusConfig;
use tracing::info;

use crate::helpers::display::{print_json, print_summary};
use crate::helpers::predictor::initialized;

/// Predict a score for the given averages
pub async fn run(
    config: &SomnusConfig,
    duration: f64,
    quality: f64,
    consistency: f64,
    k: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    let mut predictor = initialized(&config.predictor, seed).await;
    if let Some(k) = k {
        if !predictor.set_k(k) {
            bail!("k must be a positive integer, got {k}");
        }
    }

    info!(duration, quality, consistency, k = predictor.k(), "Running prediction");
    let result = predictor.predict(duration, quality, consistency).await;

    print_json(&result)?;
    print_summary(&format!(
        "{} (level: {}, k={})",
        result.message,
        result.confidence_level,
        predictor.k()
    ));
    Ok(())
}
