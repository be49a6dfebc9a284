// ABOUTME: Append-only mobility check and pain report records
// ABOUTME: Both are kept as capped sliding windows keyed by criteria or exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Answer to a self-assessed mobility check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobilityResponse {
    /// Criterion fully met
    Yes,
    /// Criterion not met
    No,
    /// Criterion partially met
    Partial,
}

impl MobilityResponse {
    /// Only a full pass counts toward unlock and readiness streaks
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl fmt::Display for MobilityResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Partial => "partial",
        };
        f.write_str(text)
    }
}

impl FromStr for MobilityResponse {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" => Ok(Self::Yes),
            "no" | "n" => Ok(Self::No),
            "partial" => Ok(Self::Partial),
            other => Err(AppError::invalid_input(format!(
                "unknown mobility response '{other}'"
            ))),
        }
    }
}

/// One mobility self-check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobilityCheck {
    /// When the check was recorded
    pub date: DateTime<Utc>,
    /// The user's answer
    pub response: MobilityResponse,
}

/// Reported pain intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PainSeverity {
    /// Noticeable, did not change the session
    Mild,
    /// Forced a load or range change
    Moderate,
    /// Stopped the exercise
    Severe,
}

impl FromStr for PainSeverity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(Self::Mild),
            "moderate" => Ok(Self::Moderate),
            "severe" => Ok(Self::Severe),
            other => Err(AppError::invalid_input(format!(
                "unknown pain severity '{other}'"
            ))),
        }
    }
}

/// Post-session pain report for one exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PainReport {
    /// When the report was recorded
    pub date: DateTime<Utc>,
    /// Whether any pain was felt
    pub had_pain: bool,
    /// Body location, e.g. `"shoulder"`
    #[serde(default)]
    pub location: Option<String>,
    /// How bad it was
    #[serde(default)]
    pub severity: Option<PainSeverity>,
}

impl PainReport {
    /// Whether this report flags pain at one of the given locations (case-insensitive)
    #[must_use]
    pub fn is_painful_at(&self, locations: &[String]) -> bool {
        if !self.had_pain {
            return false;
        }
        self.location.as_deref().is_some_and(|location| {
            let location = location.to_lowercase();
            locations
                .iter()
                .any(|relevant| location.contains(&relevant.to_lowercase()))
        })
    }
}
