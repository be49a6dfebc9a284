// ABOUTME: Persisted deload lifecycle record and the deload variants a user can start
// ABOUTME: Holds the invariant that an active deload always carries its start and end dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deload variants, from mildest volume cut to full active recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeloadType {
    /// Same loads, half the sets
    Standard,
    /// Lighter loads with slightly reduced volume
    Light,
    /// Mobility and easy movement only
    ActiveRecovery,
}

impl DeloadType {
    /// Fraction of normal working sets to perform
    #[must_use]
    pub const fn volume_multiplier(self) -> f64 {
        match self {
            Self::Standard => 0.5,
            Self::Light => 0.6,
            Self::ActiveRecovery => 0.3,
        }
    }

    /// Fraction of normal working load to use
    #[must_use]
    pub const fn intensity_multiplier(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::Light => 0.8,
            Self::ActiveRecovery => 0.6,
        }
    }

    /// Stable identifier used in storage and on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Light => "light",
            Self::ActiveRecovery => "active_recovery",
        }
    }
}

impl fmt::Display for DeloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeloadType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "standard" => Ok(Self::Standard),
            "light" => Ok(Self::Light),
            "active_recovery" => Ok(Self::ActiveRecovery),
            other => Err(AppError::invalid_input(format!(
                "unknown deload type '{other}' (expected standard, light, or active_recovery)"
            ))),
        }
    }
}

/// Persisted deload lifecycle (`Inactive -> Active -> Inactive`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeloadState {
    /// Whether a deload week is in progress
    #[serde(default)]
    pub active: bool,
    /// Variant of the running deload
    #[serde(default)]
    pub deload_type: Option<DeloadType>,
    /// When the running deload started
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// When the running deload is scheduled to finish
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Start of the most recently completed deload
    #[serde(default)]
    pub last_deload_date: Option<DateTime<Utc>>,
    /// How many times a suggested deload was postponed
    #[serde(default)]
    pub dismissed_count: u32,
}

impl DeloadState {
    /// Check the active-state invariant
    ///
    /// # Errors
    ///
    /// Returns an error if an active state lacks start/end dates or ends before it starts
    pub fn validate(&self) -> AppResult<()> {
        if !self.active {
            return Ok(());
        }
        let start = self
            .start_date
            .ok_or_else(|| AppError::missing_field("startDate"))?;
        let end = self
            .end_date
            .ok_or_else(|| AppError::missing_field("endDate"))?;
        if end < start {
            return Err(AppError::invalid_input(
                "deload endDate must not precede startDate",
            ));
        }
        Ok(())
    }
}
