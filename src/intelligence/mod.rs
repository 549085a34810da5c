// ABOUTME: Intelligence module re-exports from the somnus-intelligence crate
// ABOUTME: Lets binaries and tests reach the predictor through the main crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

//! # Intelligence Module
//!
//! Re-exports the `somnus-intelligence` crate so `somnus::intelligence::...`
//! paths mirror the crate layout.

pub use somnus_intelligence::*;

// Re-export submodules for path-based access (e.g., somnus::intelligence::fallback::population_std_dev)
pub use somnus_intelligence::{
    config, fallback, normalization, predictor, statistics, training_data,
};
