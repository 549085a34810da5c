// ABOUTME: Score command for somnus-cli
// ABOUTME: Loads sleep entries from JSON and runs the full confidence-gated score service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

use anyhow::{Context, Result};
use somnus::config::SomnusConfig;
use somnus::models::SleepEntry;
use somnus::services::SleepScoreService;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

use crate::helpers::display::{print_json, print_summary};
use crate::helpers::predictor::initialized;

/// Score the entries stored at `path`
pub async fn run(config: &SomnusConfig, path: &Path, seed: Option<u64>) -> Result<()> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read sleep entries from {}", path.display()))?;
    let entries: Vec<SleepEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid sleep entries JSON in {}", path.display()))?;

    let predictor = initialized(&config.predictor, seed).await;
    let service = SleepScoreService::new(Arc::new(RwLock::new(predictor)), config.service);
    let report = service.calculate(&entries).await?;

    print_json(&report)?;
    print_summary(&format!(
        "Sleep score {} [{}]",
        report.score,
        report.source.badge()
    ));
    Ok(())
}
