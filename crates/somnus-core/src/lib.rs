// ABOUTME: Core types and constants for the Somnus sleep intelligence workspace
// ABOUTME: Foundation crate with error handling, domain constants, and sleep data models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

#![deny(unsafe_code)]

//! # Somnus Core
//!
//! Foundation crate providing shared types and constants for the Somnus sleep
//! intelligence workspace. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Feature ranges, confidence thresholds, fallback buckets, env var names
//! - **models**: Sleep entries and the three-scalar feature vector consumed by the predictor

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`SleepEntry`, `SleepFeatures`)
pub mod models;
