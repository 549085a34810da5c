// ABOUTME: Nightly sleep entry model with bedtime/wake-time duration arithmetic
// ABOUTME: Also defines the averaged feature triple consumed by the sleep score predictor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Minutes in one day, used to wrap sessions across midnight
const MINUTES_PER_DAY: i64 = 24 * 60;

/// One night of logged sleep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntry {
    /// Night the session started on
    pub date: NaiveDate,
    /// Time asleep (hours)
    pub sleep_duration: f64,
    /// Self-reported quality (0-100)
    pub quality: f64,
    /// Number of times the sleeper woke up
    #[serde(default)]
    pub interruptions: u32,
}

impl SleepEntry {
    /// Build an entry from a bedtime and wake time on the given night
    ///
    /// A wake time at or before the bedtime is treated as the following morning.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if `quality` is outside 0-100 or not finite
    pub fn from_session(
        date: NaiveDate,
        bedtime: NaiveTime,
        wake_time: NaiveTime,
        quality: f64,
        interruptions: u32,
    ) -> AppResult<Self> {
        let mut minutes = wake_time.signed_duration_since(bedtime).num_minutes();
        if minutes <= 0 {
            minutes += MINUTES_PER_DAY;
        }

        let entry = Self {
            date,
            sleep_duration: minutes_to_hours(minutes),
            quality,
            interruptions,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Check that the entry holds plausible values
    ///
    /// # Errors
    ///
    /// Returns `AppError` when duration is negative or longer than a day, or
    /// when quality is outside 0-100
    pub fn validate(&self) -> AppResult<()> {
        if !self.sleep_duration.is_finite() || self.sleep_duration < 0.0 {
            return Err(AppError::invalid_input(format!(
                "Sleep duration must be a non-negative number of hours, got {}",
                self.sleep_duration
            )));
        }
        if self.sleep_duration > 24.0 {
            return Err(AppError::out_of_range(format!(
                "Sleep duration cannot exceed 24 hours, got {}",
                self.sleep_duration
            )));
        }
        if !(0.0..=100.0).contains(&self.quality) {
            return Err(AppError::out_of_range(format!(
                "Sleep quality must be within 0-100, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

fn minutes_to_hours(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}

/// Averaged sleep statistics fed to the predictor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepFeatures {
    /// Average sleep duration (hours, nominal range 4-10)
    pub avg_duration: f64,
    /// Average sleep quality (0-100)
    pub avg_quality: f64,
    /// Consistency score (0-20)
    pub consistency_score: f64,
}

impl SleepFeatures {
    /// Create a feature triple
    #[must_use]
    pub const fn new(avg_duration: f64, avg_quality: f64, consistency_score: f64) -> Self {
        Self {
            avg_duration,
            avg_quality,
            consistency_score,
        }
    }
}
