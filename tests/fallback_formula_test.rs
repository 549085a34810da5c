// ABOUTME: Integration tests for the closed-form fallback sleep score
// ABOUTME: Checks bucket boundaries and the reference 8h / 80 quality / 0.3 deviation case
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use somnus::intelligence::fallback::{
    consistency_points, duration_points, population_std_dev, quality_points,
};
use somnus::intelligence::FallbackScore;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_reference_breakdown() {
    let score = FallbackScore::calculate(8.0, 80.0, 0.3);
    assert!(approx(score.duration_score, 40.0));
    assert!(approx(score.quality_score, 32.0));
    assert!(approx(score.consistency_score, 20.0));
    assert_eq!(score.total, 92);
}

#[test]
fn test_duration_buckets() {
    for (hours, points) in [
        (7.0, 40.0),
        (9.0, 40.0),
        (6.0, 30.0),
        (6.99, 30.0),
        (9.5, 30.0),
        (10.0, 30.0),
        (5.0, 20.0),
        (10.5, 20.0),
        (4.99, 10.0),
        (2.0, 10.0),
    ] {
        assert!(approx(duration_points(hours), points), "{hours}h");
    }
}

#[test]
fn test_consistency_buckets() {
    for (std_dev, points) in [
        (0.0, 20.0),
        (0.49, 20.0),
        (0.5, 17.0),
        (0.99, 17.0),
        (1.0, 14.0),
        (1.5, 10.0),
        (1.99, 10.0),
        (2.0, 7.0),
        (5.0, 7.0),
    ] {
        assert!(approx(consistency_points(std_dev), points), "{std_dev}");
    }
}

#[test]
fn test_quality_is_linear() {
    assert!(approx(quality_points(0.0), 0.0));
    assert!(approx(quality_points(50.0), 20.0));
    assert!(approx(quality_points(100.0), 40.0));
}

#[test]
fn test_population_std_dev() {
    assert!(approx(population_std_dev(&[]), 0.0));
    assert!(approx(population_std_dev(&[7.0]), 0.0));
    assert!(approx(population_std_dev(&[6.0, 8.0]), 1.0));
    assert!(approx(population_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0));
}

#[test]
fn test_total_is_clamped_and_rounded() {
    let best = FallbackScore::calculate(8.0, 100.0, 0.0);
    assert_eq!(best.total, 100);
    let worst = FallbackScore::calculate(2.0, 0.0, 4.0);
    assert_eq!(worst.total, 17);
}
