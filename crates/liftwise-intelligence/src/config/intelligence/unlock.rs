// ABOUTME: Unlock evaluator configuration - complexity tiers, milestones, and mobility criteria
// ABOUTME: Maps exercise names to tiers and prerequisite/target pairs to strength requirements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! Unlock Evaluator Configuration
//!
//! Every exercise belongs to a complexity tier. `simple` exercises are always available;
//! `moderate` and `complex` exercises carry fixed requirements that must all be met
//! against the prerequisite exercise before the target unlocks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Exercise complexity tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    /// Always unlocked
    #[default]
    Simple,
    /// Needs strength and a pain-free block
    Moderate,
    /// Needs every criterion
    Complex,
}

/// Requirements attached to a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRequirements {
    /// Prerequisite strength milestone required
    pub strength_milestone: bool,
    /// Mobility criterion required
    pub mobility_check: bool,
    /// Most recent prerequisite sessions that must be pain-free (0 disables)
    pub pain_free_workouts: u32,
    /// Weeks of prerequisite training required (0 disables)
    pub training_weeks: u32,
}

impl TierRequirements {
    /// No requirement at all
    #[must_use]
    pub const fn none() -> Self {
        Self {
            strength_milestone: false,
            mobility_check: false,
            pain_free_workouts: 0,
            training_weeks: 0,
        }
    }
}

/// Load/reps/sets the prerequisite must reach before a target unlocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthMilestone {
    /// Exercise name of the prerequisite
    pub prerequisite: String,
    /// Exercise name of the unlock target
    pub target: String,
    /// Minimum load per qualifying set
    pub weight: f64,
    /// Minimum reps per qualifying set
    pub reps: u32,
    /// Qualifying sets needed within one session
    pub sets: usize,
}

impl StrengthMilestone {
    fn new(prerequisite: &str, target: &str, weight: f64, reps: u32, sets: usize) -> Self {
        Self {
            prerequisite: prerequisite.to_owned(),
            target: target.to_owned(),
            weight,
            reps,
            sets,
        }
    }
}

/// Substring keywords used to classify exercises by equipment type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseTypeKeywords {
    /// Names containing any of these are barbell lifts
    pub barbell: Vec<String>,
    /// Names containing any of these are bodyweight movements
    pub bodyweight: Vec<String>,
    /// Names containing any of these need dedicated equipment
    pub equipment: Vec<String>,
}

impl Default for ExerciseTypeKeywords {
    fn default() -> Self {
        let owned = |words: &[&str]| -> Vec<String> { words.iter().map(|w| (*w).to_owned()).collect() };
        Self {
            barbell: owned(&["barbell"]),
            bodyweight: owned(&[
                "push-up",
                "pull-up",
                "chin-up",
                "dip",
                "pistol",
                "plank",
                "inverted row",
                "bodyweight",
            ]),
            equipment: owned(&["machine", "cable", "smith", "band", "trx"]),
        }
    }
}

/// Unlock Evaluator Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnlockConfig {
    /// Requirements for moderate-tier targets
    pub moderate: TierRequirements,
    /// Requirements for complex-tier targets
    pub complex: TierRequirements,
    /// Prerequisite sessions searched for the strength milestone
    pub strength_window_sessions: usize,
    /// Trailing "yes" mobility checks needed
    pub mobility_required_checks: usize,
    /// Exercise name to tier; unknown names are simple
    pub exercise_tiers: BTreeMap<String, ComplexityTier>,
    /// Strength requirement per prerequisite/target pair
    pub strength_milestones: Vec<StrengthMilestone>,
    /// Target exercise name to mobility criteria key
    pub mobility_criteria: BTreeMap<String, String>,
    /// Equipment-type classification keywords
    pub type_keywords: ExerciseTypeKeywords,
}

impl UnlockConfig {
    /// Requirements for a tier
    #[must_use]
    pub const fn requirements(&self, tier: ComplexityTier) -> TierRequirements {
        match tier {
            ComplexityTier::Simple => TierRequirements::none(),
            ComplexityTier::Moderate => self.moderate,
            ComplexityTier::Complex => self.complex,
        }
    }

    /// Milestone registered for a prerequisite/target pair
    #[must_use]
    pub fn milestone(&self, prerequisite: &str, target: &str) -> Option<&StrengthMilestone> {
        self.strength_milestones.iter().find(|milestone| {
            milestone.prerequisite.eq_ignore_ascii_case(prerequisite)
                && milestone.target.eq_ignore_ascii_case(target)
        })
    }
}

impl Default for UnlockConfig {
    fn default() -> Self {
        let exercise_tiers = [
            ("Barbell Bench Press", ComplexityTier::Moderate),
            ("Barbell Row", ComplexityTier::Moderate),
            ("Pull-Up", ComplexityTier::Moderate),
            ("Dip", ComplexityTier::Moderate),
            ("Bulgarian Split Squat", ComplexityTier::Moderate),
            ("Barbell Back Squat", ComplexityTier::Complex),
            ("Barbell Deadlift", ComplexityTier::Complex),
            ("Barbell Overhead Press", ComplexityTier::Complex),
            ("Pistol Squat", ComplexityTier::Complex),
        ]
        .into_iter()
        .map(|(name, tier)| (name.to_owned(), tier))
        .collect();

        let mobility_criteria = [
            ("Barbell Back Squat", "squat_depth"),
            ("Barbell Deadlift", "hip_hinge"),
            ("Barbell Overhead Press", "overhead_reach"),
            ("Pistol Squat", "ankle_dorsiflexion"),
        ]
        .into_iter()
        .map(|(target, key)| (target.to_owned(), key.to_owned()))
        .collect();

        Self {
            moderate: TierRequirements {
                strength_milestone: true,
                mobility_check: false,
                pain_free_workouts: 3,
                training_weeks: 4,
            },
            complex: TierRequirements {
                strength_milestone: true,
                mobility_check: true,
                pain_free_workouts: 5,
                training_weeks: 8,
            },
            strength_window_sessions: 3,
            mobility_required_checks: 3,
            exercise_tiers,
            strength_milestones: vec![
                StrengthMilestone::new("Dumbbell Bench Press", "Barbell Bench Press", 25.0, 10, 3),
                StrengthMilestone::new("Dumbbell Row", "Barbell Row", 30.0, 10, 3),
                StrengthMilestone::new("Inverted Row", "Pull-Up", 0.0, 12, 3),
                StrengthMilestone::new("Push-Up", "Dip", 0.0, 20, 3),
                StrengthMilestone::new("Goblet Squat", "Bulgarian Split Squat", 20.0, 12, 3),
                StrengthMilestone::new("Goblet Squat", "Barbell Back Squat", 32.0, 12, 3),
                StrengthMilestone::new("Dumbbell Romanian Deadlift", "Barbell Deadlift", 30.0, 10, 3),
                StrengthMilestone::new("Dumbbell Shoulder Press", "Barbell Overhead Press", 20.0, 10, 3),
                StrengthMilestone::new("Bulgarian Split Squat", "Pistol Squat", 15.0, 10, 3),
            ],
            mobility_criteria,
            type_keywords: ExerciseTypeKeywords::default(),
        }
    }
}
