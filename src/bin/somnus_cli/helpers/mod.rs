// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence
// ABOUTME: Re-exports helper modules for somnus-cli
// ABOUTME: Provides predictor bootstrapping and output formatting utilities

pub mod display;
pub mod predictor;
