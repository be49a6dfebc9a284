// ABOUTME: Phase policy provider mapping the training phase to thresholds and flags
// ABOUTME: Every lookup is a pure function of the phase; the phase read never fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use crate::config::intelligence::DeloadConfig;
use liftwise_core::models::TrainingPhase;
use liftwise_core::storage::TrainingRepository;
use serde::Serialize;

/// Which load changes the progression evaluator may recommend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionBehavior {
    /// Load may go up when the double-progression rule is satisfied
    pub allow_weight_increase: bool,
    /// Load may go down; reserved, nothing recommends a decrease yet
    pub allow_weight_decrease: bool,
    /// Hold load and work on tempo
    pub tempo_focus: bool,
}

/// How quickly the time-based deload trigger fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeloadSensitivity {
    /// Default cadence
    Normal,
    /// Shorter cadence
    High,
    /// Shortest cadence
    VeryHigh,
}

impl DeloadSensitivity {
    /// Weeks since the last deload at which the time trigger fires
    #[must_use]
    pub const fn threshold_weeks(self, config: &DeloadConfig) -> i64 {
        match self {
            Self::Normal => config.normal_threshold_weeks,
            Self::High => config.high_threshold_weeks,
            Self::VeryHigh => config.very_high_threshold_weeks,
        }
    }
}

/// Which unlocked exercises are surfaced first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockPriority {
    /// Everything ranks equally
    All,
    /// Bodyweight and traditional movements first
    BodyweightPriority,
    /// Only bodyweight movements are offered
    SafetyFirst,
}

/// Policy bundle for one training phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhasePolicy {
    /// Phase the policy was derived from
    pub phase: TrainingPhase,
}

impl PhasePolicy {
    /// Policy for an explicit phase
    #[must_use]
    pub const fn for_phase(phase: TrainingPhase) -> Self {
        Self { phase }
    }

    /// Policy for the persisted phase; absent or corrupt values resolve to building
    #[must_use]
    pub fn current<R: TrainingRepository + ?Sized>(repo: &R) -> Self {
        Self::for_phase(repo.training_phase())
    }

    /// Load-change flags
    #[must_use]
    pub const fn progression_behavior(self) -> ProgressionBehavior {
        match self.phase {
            TrainingPhase::Building => ProgressionBehavior {
                allow_weight_increase: true,
                allow_weight_decrease: false,
                tempo_focus: false,
            },
            TrainingPhase::Maintenance => ProgressionBehavior {
                allow_weight_increase: false,
                allow_weight_decrease: false,
                tempo_focus: true,
            },
            TrainingPhase::Recovery => ProgressionBehavior {
                allow_weight_increase: false,
                allow_weight_decrease: true,
                tempo_focus: false,
            },
        }
    }

    /// Deload trigger sensitivity
    #[must_use]
    pub const fn deload_sensitivity(self) -> DeloadSensitivity {
        match self.phase {
            TrainingPhase::Building => DeloadSensitivity::Normal,
            TrainingPhase::Maintenance => DeloadSensitivity::High,
            TrainingPhase::Recovery => DeloadSensitivity::VeryHigh,
        }
    }

    /// Unlock ranking policy
    #[must_use]
    pub const fn unlock_priority(self) -> UnlockPriority {
        match self.phase {
            TrainingPhase::Building => UnlockPriority::All,
            TrainingPhase::Maintenance => UnlockPriority::BodyweightPriority,
            TrainingPhase::Recovery => UnlockPriority::SafetyFirst,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitivity_thresholds_follow_phase() {
        let config = DeloadConfig::default();
        let weeks: Vec<i64> = [
            TrainingPhase::Building,
            TrainingPhase::Maintenance,
            TrainingPhase::Recovery,
        ]
        .into_iter()
        .map(|phase| {
            PhasePolicy::for_phase(phase)
                .deload_sensitivity()
                .threshold_weeks(&config)
        })
        .collect();
        assert_eq!(weeks, vec![6, 4, 2]);
    }

    #[test]
    fn test_only_building_allows_increase() {
        assert!(PhasePolicy::for_phase(TrainingPhase::Building)
            .progression_behavior()
            .allow_weight_increase);
        let maintenance = PhasePolicy::for_phase(TrainingPhase::Maintenance).progression_behavior();
        assert!(!maintenance.allow_weight_increase);
        assert!(maintenance.tempo_focus);
    }
}
