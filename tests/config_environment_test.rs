// ABOUTME: Unit tests for environment-driven configuration loading
// ABOUTME: Validates defaults, overrides, parse failures, and validation rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use somnus::config::{Environment, LogLevel, SomnusConfig};
use somnus::constants::env_config;
use somnus::logging::{LogFormat, LoggingConfig};
use std::env;
use std::time::Duration;

const SOMNUS_VARS: [&str; 9] = [
    env_config::ENVIRONMENT,
    env_config::RUST_LOG,
    env_config::KNN_DEFAULT_K,
    env_config::KNN_CANDIDATE_KS,
    env_config::KNN_OPTIMIZE_SAMPLE,
    env_config::DIAGNOSTICS_ENABLED,
    env_config::DIAGNOSTICS_MAX_RECORDS,
    env_config::PREDICTION_TIMEOUT_MS,
    env_config::SCORE_WINDOW_DAYS,
];

fn clear_env() {
    for key in SOMNUS_VARS {
        env::remove_var(key);
    }
    env::remove_var(env_config::LOG_FORMAT);
}

#[test]
fn test_log_level_parsing() {
    assert_eq!(LogLevel::from_str_or_default("error"), LogLevel::Error);
    assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
    assert_eq!(LogLevel::from_str_or_default("info"), LogLevel::Info);
    assert_eq!(LogLevel::from_str_or_default("Debug"), LogLevel::Debug);
    assert_eq!(LogLevel::from_str_or_default("trace"), LogLevel::Trace);
    assert_eq!(
        LogLevel::from_str_or_default("debug,somnus_intelligence=trace"),
        LogLevel::Debug
    );
    assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info); // Default fallback
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
    assert_eq!(
        Environment::from_str_or_default("anything"),
        Environment::Development
    );
}

#[test]
#[serial]
fn test_defaults_from_empty_environment() {
    clear_env();
    let config = SomnusConfig::from_env().unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.predictor.default_k, 5);
    assert_eq!(config.predictor.candidate_ks, vec![3, 5, 7, 9, 11]);
    assert_eq!(config.predictor.optimization_sample_size, 100);
    assert!(!config.predictor.diagnostics.enabled);
    assert_eq!(config.predictor.diagnostics.max_records, 500);
    assert_eq!(config.service.prediction_timeout(), Duration::from_millis(2000));
    assert_eq!(config.service.window_days, 7);
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var(env_config::ENVIRONMENT, "production");
    env::set_var(env_config::KNN_DEFAULT_K, "9");
    env::set_var(env_config::KNN_CANDIDATE_KS, "1, 3 ,15");
    env::set_var(env_config::DIAGNOSTICS_ENABLED, "true");
    env::set_var(env_config::DIAGNOSTICS_MAX_RECORDS, "50");
    env::set_var(env_config::PREDICTION_TIMEOUT_MS, "250");
    env::set_var(env_config::SCORE_WINDOW_DAYS, "14");

    let config = SomnusConfig::from_env().unwrap();
    clear_env();

    assert!(config.environment.is_production());
    assert_eq!(config.predictor.default_k, 9);
    assert_eq!(config.predictor.candidate_ks, vec![1, 3, 15]);
    assert!(config.predictor.diagnostics.enabled);
    assert_eq!(config.predictor.diagnostics.max_records, 50);
    assert_eq!(config.service.prediction_timeout_ms, 250);
    assert_eq!(config.service.window_days, 14);
    assert!(config.summary().contains("Candidate k values: 1,3,15"));
}

#[test]
#[serial]
fn test_malformed_values_are_errors() {
    clear_env();
    env::set_var(env_config::KNN_DEFAULT_K, "five");
    let err = SomnusConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("SOMNUS_KNN_DEFAULT_K"));

    clear_env();
    env::set_var(env_config::KNN_CANDIDATE_KS, "3,x");
    assert!(SomnusConfig::from_env().is_err());

    clear_env();
    env::set_var(env_config::DIAGNOSTICS_ENABLED, "yes");
    assert!(SomnusConfig::from_env().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_validation_rejects_non_positive_values() {
    for (key, value) in [
        (env_config::KNN_DEFAULT_K, "0"),
        (env_config::KNN_CANDIDATE_KS, "3,0,5"),
        (env_config::KNN_CANDIDATE_KS, " , "),
        (env_config::SCORE_WINDOW_DAYS, "0"),
        (env_config::PREDICTION_TIMEOUT_MS, "0"),
    ] {
        clear_env();
        env::set_var(key, value);
        assert!(SomnusConfig::from_env().is_err(), "{key}={value} should fail");
    }
    clear_env();
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_env();
    env::set_var(env_config::LOG_FORMAT, "json");
    env::set_var(env_config::RUST_LOG, "debug");
    let logging = LoggingConfig::from_env();
    clear_env();

    assert_eq!(logging.format, LogFormat::Json);
    assert_eq!(logging.level, "debug");
    assert_eq!(logging.service_name, "somnus");
}
