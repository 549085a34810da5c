// ABOUTME: Configuration management module for the Somnus sleep score stack
// ABOUTME: Environment-only loading of predictor, diagnostics, service, and logging settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

//! Configuration module for Somnus
//!
//! - **Environment**: `SomnusConfig::from_env()` with typed defaults
//! - **Types**: `LogLevel` and `Environment` enums

/// Environment-based configuration loading
pub mod environment;
/// Core configuration type definitions
pub mod types;

pub use environment::{ServiceConfig, SomnusConfig};
pub use types::{Environment, LogLevel};
