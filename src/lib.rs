// ABOUTME: Main library entry point for the Somnus sleep score stack
// ABOUTME: Wires configuration, logging, and the confidence-gated sleep score service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

#![deny(unsafe_code)]

//! # Somnus
//!
//! Sleep score estimation from a week of sleep entries. A k-nearest-neighbors
//! predictor trained on a synthetic corpus produces a score with a confidence
//! level; when the confidence is too low (or the predictor fails or times out)
//! a closed-form formula supplies the score instead.
//!
//! ## Architecture
//!
//! - **somnus-core**: errors, constants, sleep data models
//! - **somnus-intelligence**: normalization, training data, KNN predictor, k search, fallback formula
//! - **services**: weekly aggregation and the fallback policy
//! - **config** / **logging**: environment-driven runtime setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use somnus::config::SomnusConfig;
//! use somnus::services::{initialize_predictor, SleepScoreService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SomnusConfig::from_env()?;
//!     let predictor = initialize_predictor(config.predictor.clone()).await;
//!     let service = SleepScoreService::new(predictor, config.service);
//!
//!     let report = service.calculate(&[]).await;
//!     assert!(report.is_err());
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Production logging and structured output
pub mod logging;

/// Domain service layer
pub mod services;

/// Sleep score prediction engine
pub mod intelligence;

pub use somnus_core::{constants, errors, models};
