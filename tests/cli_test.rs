// ABOUTME: End-to-end tests for the somnus-cli binary
// ABOUTME: Runs subcommands as child processes and parses their JSON output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serde_json::Value;
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn somnus_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_somnus-cli"))
        .args(args)
        .env("RUST_LOG", "warn")
        .env_remove("SOMNUS_KNN_CANDIDATE_KS")
        .env_remove("SOMNUS_KNN_DEFAULT_K")
        .output()
        .expect("failed to launch somnus-cli")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "somnus-cli failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_predict_prints_prediction_result() {
    let output = somnus_cli(&[
        "predict",
        "--duration",
        "8",
        "--quality",
        "95",
        "--consistency",
        "19",
        "--seed",
        "7",
    ]);
    let json = stdout_json(&output);

    let score = json["score"].as_u64().unwrap();
    assert!(score <= 100);
    assert!(json["confidenceLevel"].is_string());
    assert!(json["message"].as_str().unwrap().contains('%'));
}

#[test]
fn test_predict_rejects_zero_k() {
    let output = somnus_cli(&[
        "predict",
        "--duration",
        "8",
        "--quality",
        "80",
        "--consistency",
        "15",
        "--k",
        "0",
        "--seed",
        "1",
    ]);
    assert!(!output.status.success());
}

#[test]
fn test_score_reads_entries_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("week.json");
    fs::write(
        &path,
        r#"[
            {"date": "2025-03-01", "sleepDuration": 7.7, "quality": 80, "interruptions": 1},
            {"date": "2025-03-02", "sleepDuration": 8.3, "quality": 80, "interruptions": 0},
            {"date": "2025-03-03", "sleepDuration": 8.0, "quality": 80}
        ]"#,
    )
    .unwrap();

    let output = somnus_cli(&["score", "--entries", path.to_str().unwrap(), "--seed", "3"]);
    let json = stdout_json(&output);

    assert!(json["score"].as_u64().unwrap() <= 100);
    assert_eq!(json["stats"]["entries"], 3);
    let source = json["source"].as_str().unwrap();
    assert!(source == "aiPrediction" || source == "standardCalculation");
}

#[test]
fn test_score_rejects_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");
    let output = somnus_cli(&["score", "--entries", path.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn test_optimize_reports_candidates() {
    let output = somnus_cli(&["optimize", "--candidates", "1,3,5", "--sample", "30", "--seed", "9"]);
    let json = stdout_json(&output);

    let best_k = json["bestK"].as_u64().unwrap();
    assert!([1, 3, 5].contains(&best_k));
    let results = json["allResults"].as_object().unwrap();
    assert_eq!(results.len(), 3);
}

#[test]
fn test_stats_reports_corpus_and_debug_info() {
    let output = somnus_cli(&["stats", "--count", "50", "--seed", "4"]);
    let json = stdout_json(&output);

    assert_eq!(json["trainingData"]["count"], 54);
    assert_eq!(json["predictor"]["supportSetSize"], 54);
    assert_eq!(json["predictor"]["modelInitialized"], true);
}
