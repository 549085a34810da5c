// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence
// ABOUTME: Predictor bootstrapping for somnus-cli commands
// ABOUTME: Seeds the synthetic corpus when asked so runs can be reproduced

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use somnus::intelligence::{PredictorConfig, SleepScorePredictor};
use tracing::info;

/// Random source for a command: seeded when `seed` is given, otherwise from entropy
pub fn rng(seed: Option<u64>) -> ChaCha8Rng {
    seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64)
}

/// Build and initialize a predictor
pub async fn initialized(config: &PredictorConfig, seed: Option<u64>) -> SleepScorePredictor {
    let mut predictor = SleepScorePredictor::with_config(config.clone());
    let mut rng = rng(seed);
    predictor.initialize_with_rng(&mut rng).await;
    info!(
        k = predictor.k(),
        support_set_size = predictor.support_set_size(),
        seeded = seed.is_some(),
        "Predictor ready"
    );
    predictor
}
