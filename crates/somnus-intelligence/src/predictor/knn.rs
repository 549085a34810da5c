// ABOUTME: Support-set storage and k-nearest-neighbor voting over normalized sleep features
// ABOUTME: Linear Euclidean scan, stable tie-breaking, majority vote over integer score labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

use rayon::prelude::*;
use thiserror::Error;

/// Dimensionality of the normalized feature space
pub const FEATURE_DIMENSIONS: usize = 3;

/// A stored (normalized features, label) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportExample {
    /// Normalized duration, quality, consistency
    pub features: [f64; FEATURE_DIMENSIONS],
    /// Raw 0-100 score; the normalized label is `score / 100`
    pub score: u8,
}

impl SupportExample {
    /// Label on the unit interval
    #[must_use]
    pub fn label(&self) -> f64 {
        f64::from(self.score) / 100.0
    }
}

/// Failures inside the nearest-neighbor computation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// An input feature was NaN or infinite
    #[error("{feature} is not a finite number ({value})")]
    NonFiniteFeature {
        /// Feature name
        feature: &'static str,
        /// Offending value
        value: f64,
    },
    /// No examples to vote with
    #[error("support set is empty")]
    EmptySupportSet,
    /// A distance computation overflowed or produced NaN
    #[error("distance to support example {index} is not finite")]
    NonFiniteDistance {
        /// Position of the example in the support set
        index: usize,
    },
    /// The background scan panicked or was cancelled
    #[error("neighbor search aborted: {0}")]
    SearchAborted(String),
}

/// Outcome of a neighbor vote
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vote {
    /// Winning normalized label
    pub label: f64,
    /// Share of the neighbors that voted for the winner
    pub confidence: f64,
    /// Number of neighbors that took part
    pub neighbors: usize,
}

fn euclidean(a: &[f64; FEATURE_DIMENSIONS], b: &[f64; FEATURE_DIMENSIONS]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Majority vote among the `k` examples closest to `query`
///
/// `k` is capped at the support-set size. Equidistant examples keep their
/// insertion order; among labels with equal vote counts the one whose nearest
/// member ranks first wins.
///
/// # Errors
///
/// Returns `PredictionError` for an empty support set or a non-finite distance
pub fn nearest_vote(
    support: &[SupportExample],
    query: &[f64; FEATURE_DIMENSIONS],
    k: usize,
) -> Result<Vote, PredictionError> {
    if support.is_empty() {
        return Err(PredictionError::EmptySupportSet);
    }
    let neighbors = k.clamp(1, support.len());

    let mut distances: Vec<(f64, usize)> = support
        .par_iter()
        .enumerate()
        .map(|(index, example)| (euclidean(query, &example.features), index))
        .collect();

    if let Some(&(_, index)) = distances.iter().find(|(d, _)| !d.is_finite()) {
        return Err(PredictionError::NonFiniteDistance { index });
    }

    distances.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    // (score, votes) in order of first appearance
    let mut tally: Vec<(u8, usize)> = Vec::new();
    for &(_, index) in &distances[..neighbors] {
        let score = support[index].score;
        match tally.iter_mut().find(|(s, _)| *s == score) {
            Some((_, votes)) => *votes += 1,
            None => tally.push((score, 1)),
        }
    }

    let (winner, votes) = tally
        .iter()
        .fold((0_u8, 0_usize), |best, &(score, votes)| {
            if votes > best.1 {
                (score, votes)
            } else {
                best
            }
        });

    Ok(Vote {
        label: f64::from(winner) / 100.0,
        confidence: votes as f64 / neighbors as f64,
        neighbors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(x: f64, score: u8) -> SupportExample {
        SupportExample {
            features: [x, 0.5, 0.5],
            score,
        }
    }

    #[test]
    fn test_empty_support_set() {
        assert_eq!(
            nearest_vote(&[], &[0.0; 3], 3),
            Err(PredictionError::EmptySupportSet)
        );
    }

    #[test]
    fn test_majority_wins() {
        let support = [
            example(0.10, 60),
            example(0.11, 60),
            example(0.12, 70),
            example(0.90, 20),
        ];
        let vote = nearest_vote(&support, &[0.1, 0.5, 0.5], 3).unwrap();
        assert!((vote.label - 0.6).abs() < 1e-12);
        assert!((vote.confidence - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(vote.neighbors, 3);
    }

    #[test]
    fn test_k_capped_at_support_size() {
        let support = [example(0.2, 40), example(0.3, 40)];
        let vote = nearest_vote(&support, &[0.2, 0.5, 0.5], 9).unwrap();
        assert_eq!(vote.neighbors, 2);
        assert!((vote.confidence - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tied_labels_prefer_nearest() {
        let support = [
            example(0.50, 80),
            example(0.40, 30),
            example(0.52, 80),
            example(0.41, 30),
        ];
        let vote = nearest_vote(&support, &[0.40, 0.5, 0.5], 4).unwrap();
        assert!((vote.label - 0.3).abs() < 1e-12);
        assert!((vote.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_equidistant_examples_keep_insertion_order() {
        let support = [example(0.75, 10), example(0.25, 90)];
        let vote = nearest_vote(&support, &[0.5, 0.5, 0.5], 1).unwrap();
        assert!((vote.label - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_infinite_query_rejected() {
        let support = [example(0.6, 10)];
        let result = nearest_vote(&support, &[f64::INFINITY, 0.5, 0.5], 1);
        assert_eq!(result, Err(PredictionError::NonFiniteDistance { index: 0 }));
    }
}
