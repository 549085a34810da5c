// ABOUTME: Unified error handling with error codes and the application error type
// ABOUTME: Shared by the intelligence crate, the sleep-score service, and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

//! # Unified Error Handling System
//!
//! Defines standard error codes and the `AppError` type so every layer of the
//! workspace reports failures in the same shape.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A value fell outside its accepted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Prediction (5000-5999)
    /// The predictor could not produce a result
    #[serde(rename = "PREDICTION_UNAVAILABLE")]
    PredictionUnavailable = 5000,
    /// The predictor did not answer within the allotted time
    #[serde(rename = "PREDICTION_TIMEOUT")]
    PredictionTimeout = 5001,

    // Internal Errors (9000-9999)
    /// Data could not be (de)serialized
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::PredictionUnavailable => "The sleep score predictor could not produce a result",
            Self::PredictionTimeout => "The sleep score predictor timed out",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value outside of its accepted range
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Predictor failed to produce a usable result
    pub fn prediction_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PredictionUnavailable, message)
    }

    /// Predictor exceeded its time budget
    #[must_use]
    pub fn prediction_timeout(timeout_ms: u64) -> Self {
        Self::new(
            ErrorCode::PredictionTimeout,
            format!("No prediction within {timeout_ms}ms"),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::invalid_input("no sleep entries");
        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert_eq!(
            error.to_string(),
            "The provided input is invalid: no sleep entries"
        );
    }

    #[test]
    fn test_timeout_message() {
        let error = AppError::prediction_timeout(250);
        assert_eq!(error.code, ErrorCode::PredictionTimeout);
        assert!(error.message.contains("250ms"));
    }

    #[test]
    fn test_serde_error_conversion_keeps_source() {
        let parse = serde_json::from_str::<u32>("not a number").unwrap_err();
        let error = AppError::from(parse);
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(StdError::source(&error).is_some());
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::PredictionTimeout).unwrap();
        assert_eq!(json, "\"PREDICTION_TIMEOUT\"");
    }
}
