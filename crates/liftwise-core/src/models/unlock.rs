// ABOUTME: Permanent unlock records for harder exercise variants
// ABOUTME: Stores the criteria snapshot that was true at the moment of unlocking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-criterion outcome of an unlock evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaSnapshot {
    /// Prerequisite strength milestone reached
    pub strength_milestone: bool,
    /// Mobility criterion passed three times in a row
    pub mobility_check: bool,
    /// Recent prerequisite sessions were pain-free
    pub pain_free: bool,
    /// Enough weeks of prerequisite training
    pub training_weeks: bool,
}

impl CriteriaSnapshot {
    /// Every criterion trivially met
    #[must_use]
    pub const fn all_met() -> Self {
        Self {
            strength_milestone: true,
            mobility_check: true,
            pain_free: true,
            training_weeks: true,
        }
    }

    /// Whether every criterion is met
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.strength_milestone && self.mobility_check && self.pain_free && self.training_weeks
    }
}

/// A granted unlock; once written it is never revoked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRecord {
    /// Unlocked exercise
    pub exercise_name: String,
    /// When the unlock was granted
    pub unlocked_date: DateTime<Utc>,
    /// Criteria state at unlock time
    pub criteria: CriteriaSnapshot,
}
