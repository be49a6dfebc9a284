// ABOUTME: Output helpers for the liftwise CLI
// ABOUTME: Renders command results as pretty JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use anyhow::{Context, Result};
use serde::Serialize;

/// Print any serializable result as indented JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}
