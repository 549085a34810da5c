// ABOUTME: Synthetic training corpus for the KNN sleep score predictor
// ABOUTME: Five interleaved sleep archetypes with noisy scores plus fixed edge-case examples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

//! Training-set synthesis
//!
//! Each synthetic example is drawn from one of five archetypes, cycling by index
//! modulo 5. Feature values come from the archetype's sub-ranges and the score is
//!
//! `base + quality / 100 * quality_weight + consistency + U(-2.5, 2.5)`
//!
//! clamped to 0-100. Features are then clamped to their declared ranges and the
//! score is rounded. Four hand-picked edge cases are appended verbatim.
//!
//! The random source is injectable so tests can pin a seed.

use crate::normalization::FeatureKind;
use crate::statistics::TrainingDataStatistics;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use somnus_core::constants::{feature_ranges, knn};
use somnus_core::models::SleepFeatures;
use tracing::debug;

/// Raw (un-normalized) labeled example
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingExample {
    /// Average sleep duration (hours)
    pub avg_duration: f64,
    /// Average sleep quality (0-100)
    pub avg_quality: f64,
    /// Consistency score (0-20)
    pub consistency_score: f64,
    /// Expected sleep score (0-100)
    pub sleep_score: u8,
}

impl TrainingExample {
    /// Create an example
    #[must_use]
    pub const fn new(
        avg_duration: f64,
        avg_quality: f64,
        consistency_score: f64,
        sleep_score: u8,
    ) -> Self {
        Self {
            avg_duration,
            avg_quality,
            consistency_score,
            sleep_score,
        }
    }

    /// Feature triple of this example
    #[must_use]
    pub const fn features(&self) -> SleepFeatures {
        SleepFeatures::new(self.avg_duration, self.avg_quality, self.consistency_score)
    }
}

/// Hand-picked examples appended after the synthetic ones
pub const EDGE_CASE_EXAMPLES: [TrainingExample; 4] = [
    // Very short sleep with unexpectedly good quality
    TrainingExample::new(4.2, 75.0, 15.0, 55),
    // Very long sleep with poor quality
    TrainingExample::new(10.5, 30.0, 10.0, 45),
    // Near-perfect night
    TrainingExample::new(8.0, 95.0, 19.0, 98),
    // Worst case
    TrainingExample::new(3.5, 15.0, 3.0, 15),
];

/// Sleep pattern families the synthetic corpus cycles through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SleepArchetype {
    /// 7-9 hours, high quality, very regular
    Optimal,
    /// 4-6 hours, middling quality, irregular
    Insufficient,
    /// 9-11 hours, middling quality, moderately regular
    Oversleeping,
    /// 3-5 hours, poor quality, very irregular
    Poor,
    /// 6-7.5 hours, average quality, fairly regular
    Average,
}

/// Sampling ranges and score formula for one archetype
#[derive(Debug, Clone, Copy)]
struct ArchetypeProfile {
    duration: (f64, f64),
    quality: (f64, f64),
    consistency: (f64, f64),
    base_score: f64,
    quality_weight: f64,
}

impl SleepArchetype {
    /// Archetypes in cycle order
    pub const CYCLE: [Self; 5] = [
        Self::Optimal,
        Self::Insufficient,
        Self::Oversleeping,
        Self::Poor,
        Self::Average,
    ];

    /// Archetype used for the example at `index`
    #[must_use]
    pub const fn for_index(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }

    const fn profile(self) -> ArchetypeProfile {
        match self {
            Self::Optimal => ArchetypeProfile {
                duration: (7.0, 9.0),
                quality: (70.0, 100.0),
                consistency: (15.0, 20.0),
                base_score: 40.0,
                quality_weight: 40.0,
            },
            Self::Insufficient => ArchetypeProfile {
                duration: (4.0, 6.0),
                quality: (30.0, 70.0),
                consistency: (5.0, 14.0),
                base_score: 10.0,
                quality_weight: 40.0,
            },
            Self::Oversleeping => ArchetypeProfile {
                duration: (9.0, 11.0),
                quality: (40.0, 70.0),
                consistency: (8.0, 15.0),
                base_score: 20.0,
                quality_weight: 40.0,
            },
            Self::Poor => ArchetypeProfile {
                duration: (3.0, 5.0),
                quality: (10.0, 40.0),
                consistency: (0.0, 7.0),
                base_score: 10.0,
                quality_weight: 30.0,
            },
            Self::Average => ArchetypeProfile {
                duration: (6.0, 7.5),
                quality: (50.0, 80.0),
                consistency: (10.0, 17.0),
                base_score: 30.0,
                quality_weight: 40.0,
            },
        }
    }

    /// Draw one example of this archetype
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> TrainingExample {
        let profile = self.profile();
        let duration = rng.gen_range(profile.duration.0..profile.duration.1);
        let quality = rng.gen_range(profile.quality.0..profile.quality.1);
        let consistency = rng.gen_range(profile.consistency.0..profile.consistency.1);

        let noise = rng.gen_range(-knn::SCORE_NOISE_HALF_WIDTH..knn::SCORE_NOISE_HALF_WIDTH);
        let score = (quality / 100.0)
            .mul_add(profile.quality_weight, profile.base_score + consistency)
            + noise;

        TrainingExample {
            avg_duration: FeatureKind::Duration.range().clamp(duration),
            avg_quality: FeatureKind::Quality.range().clamp(quality),
            consistency_score: FeatureKind::Consistency.range().clamp(consistency),
            sleep_score: round_score(score),
        }
    }
}

/// Clamp to the score range and round to the nearest integer
#[must_use]
pub fn round_score(score: f64) -> u8 {
    score
        .clamp(feature_ranges::SCORE_MIN, feature_ranges::SCORE_MAX)
        .round() as u8
}

/// Builds the synthetic training corpus
#[derive(Debug, Clone, Copy)]
pub struct TrainingDataGenerator {
    synthetic_count: usize,
}

impl Default for TrainingDataGenerator {
    fn default() -> Self {
        Self {
            synthetic_count: knn::SYNTHETIC_EXAMPLE_COUNT,
        }
    }
}

impl TrainingDataGenerator {
    /// Generator producing `synthetic_count` archetype examples before the edge cases
    #[must_use]
    pub const fn with_count(synthetic_count: usize) -> Self {
        Self { synthetic_count }
    }

    /// Number of examples a call to `generate` returns
    #[must_use]
    pub const fn total_len(&self) -> usize {
        self.synthetic_count + EDGE_CASE_EXAMPLES.len()
    }

    /// Generate the corpus from the system random source
    #[must_use]
    pub fn generate_training_data(&self) -> Vec<TrainingExample> {
        let mut rng = StdRng::from_entropy();
        self.generate(&mut rng)
    }

    /// Generate the corpus from the given random source
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<TrainingExample> {
        let mut examples = Vec::with_capacity(self.total_len());
        examples.extend(
            (0..self.synthetic_count).map(|i| SleepArchetype::for_index(i).sample(&mut *rng)),
        );
        examples.extend_from_slice(&EDGE_CASE_EXAMPLES);

        if let Some(stats) = TrainingDataStatistics::from_examples(&examples) {
            debug!(
                count = stats.count,
                avg_score = stats.sleep_score.avg,
                "Generated synthetic training dataset"
            );
            debug!("Training data statistics: {}", stats.to_json());
        }

        examples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_archetypes_cycle_by_index() {
        assert_eq!(SleepArchetype::for_index(0), SleepArchetype::Optimal);
        assert_eq!(SleepArchetype::for_index(3), SleepArchetype::Poor);
        assert_eq!(SleepArchetype::for_index(9), SleepArchetype::Average);
        assert_eq!(SleepArchetype::for_index(10), SleepArchetype::Optimal);
    }

    #[test]
    fn test_poor_sleep_duration_is_clamped_to_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let example = SleepArchetype::Poor.sample(&mut rng);
            assert!(example.avg_duration >= feature_ranges::DURATION_MIN);
            assert!(example.avg_duration < 5.0);
            assert!(example.sleep_score <= 40);
        }
    }

    #[test]
    fn test_optimal_scores_stay_high() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let example = SleepArchetype::Optimal.sample(&mut rng);
            // 40 + 28 + 15 - 2.5 at the lowest
            assert!(example.sleep_score >= 80, "{example:?}");
        }
    }

    #[test]
    fn test_round_score_clamps() {
        assert_eq!(round_score(104.2), 100);
        assert_eq!(round_score(-3.0), 0);
        assert_eq!(round_score(54.5), 55);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let generator = TrainingDataGenerator::with_count(50);
        let first = generator.generate(&mut ChaCha8Rng::seed_from_u64(42));
        let second = generator.generate(&mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(first, second);
        assert_eq!(first.len(), 54);
    }
}
