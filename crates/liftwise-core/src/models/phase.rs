// ABOUTME: Training phase scalar that selects threshold policies across the engine
// ABOUTME: Unknown or corrupt stored values always resolve to the building phase
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Macro training phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingPhase {
    /// Adding load whenever progression allows
    #[default]
    Building,
    /// Holding load, working on tempo and quality
    Maintenance,
    /// Backing off after injury or long layoff
    Recovery,
}

impl TrainingPhase {
    /// Stored identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Maintenance => "maintenance",
            Self::Recovery => "recovery",
        }
    }

    /// Lenient parse used on the read path
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            warn!(value = raw, "Unknown training phase, falling back to building");
            Self::Building
        })
    }
}

impl fmt::Display for TrainingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingPhase {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "building" => Ok(Self::Building),
            "maintenance" => Ok(Self::Maintenance),
            "recovery" => Ok(Self::Recovery),
            other => Err(AppError::invalid_input(format!(
                "unknown training phase '{other}'"
            ))),
        }
    }
}
