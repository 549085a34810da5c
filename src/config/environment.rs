// ABOUTME: Environment-based configuration loading for the Somnus sleep score stack
// ABOUTME: Reads predictor, diagnostics, and service settings from env vars with typed defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

//! Environment-only configuration
//!
//! Every setting has a default taken from `somnus_core::constants`, so an empty
//! environment yields a working configuration. Malformed values are errors
//! rather than silent fallbacks.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use somnus_core::constants::{diagnostics, env_config, knn, service};
use somnus_intelligence::{DiagnosticsConfig, PredictorConfig};
use std::env;
use std::time::Duration;
use tracing::info;

pub use super::types::{Environment, LogLevel};

/// Settings for the sleep score service wrapped around the predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// Time budget for a single prediction (milliseconds)
    pub prediction_timeout_ms: u64,
    /// Number of most recent entries aggregated per score
    pub window_days: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            prediction_timeout_ms: service::PREDICTION_TIMEOUT_MS,
            window_days: service::SCORE_WINDOW_DAYS,
        }
    }
}

impl ServiceConfig {
    /// Prediction time budget as a `Duration`
    #[must_use]
    pub const fn prediction_timeout(&self) -> Duration {
        Duration::from_millis(self.prediction_timeout_ms)
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SomnusConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// KNN predictor settings
    pub predictor: PredictorConfig,
    /// Sleep score service settings
    pub service: ServiceConfig,
}

impl SomnusConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or if the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or(
                env_config::ENVIRONMENT,
                "development",
            )),
            log_level: LogLevel::from_str_or_default(&env_var_or(env_config::RUST_LOG, "info")),

            predictor: PredictorConfig {
                default_k: env_var_or(env_config::KNN_DEFAULT_K, &knn::DEFAULT_K.to_string())
                    .parse()
                    .context("Invalid SOMNUS_KNN_DEFAULT_K value")?,
                candidate_ks: parse_candidates(&env_var_or(
                    env_config::KNN_CANDIDATE_KS,
                    &join_candidates(&knn::INITIALIZATION_CANDIDATE_KS),
                ))
                .context("Invalid SOMNUS_KNN_CANDIDATE_KS value")?,
                optimization_sample_size: env_var_or(
                    env_config::KNN_OPTIMIZE_SAMPLE,
                    &knn::OPTIMIZATION_SAMPLE_SIZE.to_string(),
                )
                .parse()
                .context("Invalid SOMNUS_KNN_OPTIMIZE_SAMPLE value")?,
                diagnostics: DiagnosticsConfig {
                    enabled: env_var_or(env_config::DIAGNOSTICS_ENABLED, "false")
                        .parse()
                        .context("Invalid SOMNUS_DIAGNOSTICS_ENABLED value")?,
                    max_records: env_var_or(
                        env_config::DIAGNOSTICS_MAX_RECORDS,
                        &diagnostics::MAX_RECORDS.to_string(),
                    )
                    .parse()
                    .context("Invalid SOMNUS_DIAGNOSTICS_MAX_RECORDS value")?,
                    ..DiagnosticsConfig::default()
                },
                ..PredictorConfig::default()
            },

            service: ServiceConfig {
                prediction_timeout_ms: env_var_or(
                    env_config::PREDICTION_TIMEOUT_MS,
                    &service::PREDICTION_TIMEOUT_MS.to_string(),
                )
                .parse()
                .context("Invalid SOMNUS_PREDICTION_TIMEOUT_MS value")?,
                window_days: env_var_or(
                    env_config::SCORE_WINDOW_DAYS,
                    &service::SCORE_WINDOW_DAYS.to_string(),
                )
                .parse()
                .context("Invalid SOMNUS_SCORE_WINDOW_DAYS value")?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for a zero neighbor count, an empty or zero-containing
    /// candidate list, a zero timeout, or a zero score window
    pub fn validate(&self) -> Result<()> {
        if self.predictor.default_k == 0 {
            bail!("SOMNUS_KNN_DEFAULT_K must be a positive integer");
        }
        if self.predictor.candidate_ks.is_empty() {
            bail!("SOMNUS_KNN_CANDIDATE_KS must list at least one candidate");
        }
        if self.predictor.candidate_ks.contains(&0) {
            bail!("SOMNUS_KNN_CANDIDATE_KS candidates must be positive integers");
        }
        if self.predictor.diagnostics.max_records == 0 {
            bail!("SOMNUS_DIAGNOSTICS_MAX_RECORDS must be at least 1");
        }
        if self.service.prediction_timeout_ms == 0 {
            bail!("SOMNUS_PREDICTION_TIMEOUT_MS must be at least 1");
        }
        if self.service.window_days == 0 {
            bail!("SOMNUS_SCORE_WINDOW_DAYS must be at least 1");
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Somnus Configuration:\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Default k: {}\n\
             - Candidate k values: {}\n\
             - k search sample: {}\n\
             - Diagnostics: {} (max {} records)\n\
             - Prediction timeout: {}ms\n\
             - Score window: {} days",
            self.environment,
            self.log_level,
            self.predictor.default_k,
            join_candidates(&self.predictor.candidate_ks),
            self.predictor.optimization_sample_size,
            if self.predictor.diagnostics.enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.predictor.diagnostics.max_records,
            self.service.prediction_timeout_ms,
            self.service.window_days,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse a comma-separated list of neighbor counts
///
/// # Errors
///
/// Returns an error if any entry is not an unsigned integer
pub fn parse_candidates(list: &str) -> Result<Vec<usize>> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<usize>()
                .with_context(|| format!("'{entry}' is not a valid neighbor count"))
        })
        .collect()
}

fn join_candidates(candidates: &[usize]) -> String {
    candidates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_candidates() {
        assert_eq!(parse_candidates("3, 5,7,,9").unwrap(), vec![3, 5, 7, 9]);
        assert!(parse_candidates("3,five").is_err());
        assert!(parse_candidates("").unwrap().is_empty());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SomnusConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.predictor.candidate_ks, vec![3, 5, 7, 9, 11]);
        assert_eq!(config.service.prediction_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = SomnusConfig::default();
        config.service.window_days = 0;
        assert!(config.validate().is_err());
    }
}
