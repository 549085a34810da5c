// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence
// ABOUTME: Re-exports command modules for somnus-cli
// ABOUTME: Provides access to predict, optimize, score, and stats commands

pub mod optimize;
pub mod predict;
pub mod score;
pub mod stats;
