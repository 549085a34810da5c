// ABOUTME: Somnus CLI - command-line front end for the sleep score predictor
// ABOUTME: Runs predictions, k searches, full score calculations, and corpus statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence
//!
//! Usage:
//! ```bash
//! # Predict a score from weekly averages
//! somnus-cli predict --duration 7.8 --quality 82 --consistency 17
//!
//! # Reproducible prediction with a fixed training corpus
//! somnus-cli predict --duration 5.2 --quality 40 --consistency 8 --seed 42
//!
//! # Search for the best neighbor count
//! somnus-cli optimize --candidates 1,3,5,7,9 --sample 200
//!
//! # Score a week of sleep entries (JSON array)
//! somnus-cli score --entries week.json
//!
//! # Training corpus statistics and predictor debug info
//! somnus-cli stats --seed 7
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use somnus::config::SomnusConfig;
use somnus::logging::LoggingConfig;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "somnus-cli",
    about = "Somnus sleep score CLI",
    long_about = "Command-line tool for the Somnus KNN sleep score predictor and its formula fallback."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Predict a sleep score from weekly averages
    Predict {
        /// Average sleep duration in hours
        #[arg(long)]
        duration: f64,

        /// Average sleep quality (0-100)
        #[arg(long)]
        quality: f64,

        /// Consistency score (0-20)
        #[arg(long)]
        consistency: f64,

        /// Neighbor count override (skips the tuned value)
        #[arg(long)]
        k: Option<usize>,

        /// Seed for the synthetic training corpus
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Evaluate candidate neighbor counts on a fresh synthetic test set
    Optimize {
        /// Candidate k values (comma-separated, defaults to 1,3,5,7,9)
        #[arg(long, value_delimiter = ',')]
        candidates: Option<Vec<usize>>,

        /// Number of synthetic test examples
        #[arg(long, default_value = "100")]
        sample: usize,

        /// Seed for the training corpus and test set
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Calculate a sleep score from a JSON file of sleep entries
    Score {
        /// Path to a JSON array of entries (`date`, `sleepDuration`, `quality`, `interruptions`)
        #[arg(long)]
        entries: PathBuf,

        /// Seed for the synthetic training corpus
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show training corpus statistics and predictor debug info
    Stats {
        /// Number of synthetic examples before the edge cases
        #[arg(long, default_value = "1000")]
        count: usize,

        /// Seed for the synthetic corpus
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let config = SomnusConfig::from_env()?;
    debug!("{}", config.summary());

    match cli.command {
        Command::Predict {
            duration,
            quality,
            consistency,
            k,
            seed,
        } => {
            commands::predict::run(&config, duration, quality, consistency, k, seed).await?;
        }
        Command::Optimize {
            candidates,
            sample,
            seed,
        } => {
            commands::optimize::run(&config, candidates, sample, seed).await?;
        }
        Command::Score { entries, seed } => {
            commands::score::run(&config, &entries, seed).await?;
        }
        Command::Stats { count, seed } => {
            commands::stats::run(&config, count, seed).await?;
        }
    }

    Ok(())
}
