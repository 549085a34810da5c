// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Somnus Sleep Intelligence
// ABOUTME: Output formatting helpers for somnus-cli
// ABOUTME: Prints pretty JSON to stdout and a short human summary to stderr

use anyhow::{Context, Result};
use serde::Serialize;

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}

/// Print a one-line summary on stderr so stdout stays valid JSON
pub fn print_summary(line: &str) {
    eprintln!("{line}");
}
