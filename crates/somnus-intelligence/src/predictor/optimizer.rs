// ABOUTME: Neighbor-count search over a held-out test set
// ABOUTME: Scores each candidate k by mean absolute error and keeps the lowest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

use super::SleepScorePredictor;
use crate::training_data::TrainingExample;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Evaluation of a single candidate `k`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KEvaluation {
    /// Mean absolute error over successful predictions, infinite when none succeeded
    pub avg_error: f64,
    /// Share of test examples that produced a score
    pub success_rate: f64,
}

impl KEvaluation {
    const UNUSABLE: Self = Self {
        avg_error: f64::INFINITY,
        success_rate: 0.0,
    };
}

/// Outcome of a k search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KOptimizationResult {
    /// Candidate with the lowest average error, first one wins ties
    pub best_k: usize,
    /// Average error of `best_k`
    pub lowest_error: f64,
    /// Evaluation of every candidate
    pub all_results: BTreeMap<usize, KEvaluation>,
}

impl SleepScorePredictor {
    /// Evaluate each candidate `k` against `test_data` and keep the best
    ///
    /// Returns `None` without touching `k` when the model is uninitialized, the
    /// test set is empty, or no candidate is a positive integer. A zero
    /// candidate is reported with an infinite error.
    pub async fn optimize_k(
        &mut self,
        test_data: &[TrainingExample],
        candidates: &[usize],
    ) -> Option<KOptimizationResult> {
        if !self.initialized || test_data.is_empty() {
            warn!(
                initialized = self.initialized,
                test_examples = test_data.len(),
                "Model not initialized or no test data, skipping k search"
            );
            return None;
        }

        let original_k = self.k;
        let mut all_results = BTreeMap::new();
        let mut best: Option<(usize, f64)> = None;

        for &k in candidates {
            let evaluation = if self.set_k(k) {
                self.evaluate(test_data).await
            } else {
                KEvaluation::UNUSABLE
            };
            debug!(
                k,
                avg_error = evaluation.avg_error,
                success_rate = evaluation.success_rate,
                "Evaluated neighbor count"
            );

            if k > 0 && best.is_none_or(|(_, lowest)| evaluation.avg_error < lowest) {
                best = Some((k, evaluation.avg_error));
            }
            all_results.insert(k, evaluation);
        }

        let Some((best_k, lowest_error)) = best else {
            self.k = original_k;
            warn!(?candidates, "No usable k candidates, keeping k={original_k}");
            return None;
        };

        self.k = best_k;
        info!(best_k, lowest_error, "Optimal neighbor count selected");

        Some(KOptimizationResult {
            best_k,
            lowest_error,
            all_results,
        })
    }

    async fn evaluate(&self, test_data: &[TrainingExample]) -> KEvaluation {
        let mut total_error = 0.0;
        let mut successes = 0_usize;

        for example in test_data {
            let result = self.predict_features(&example.features()).await;
            if let Some(score) = result.score {
                total_error += (f64::from(score) - f64::from(example.sleep_score)).abs();
                successes += 1;
            }
        }

        KEvaluation {
            avg_error: if successes > 0 {
                total_error / successes as f64
            } else {
                f64::INFINITY
            },
            success_rate: successes as f64 / test_data.len() as f64,
        }
    }
}
