// ABOUTME: Readiness scorer configuration - composite weights and tracked equipment transitions
// ABOUTME: Each transition names its source exercise, targets, mobility key, and pain locations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use serde::{Deserialize, Serialize};

/// Weights of the four readiness criteria; they must sum to 1.0
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessWeights {
    /// Strength progress weight
    pub strength: f64,
    /// Training weeks weight
    pub weeks: f64,
    /// Mobility streak weight
    pub mobility: f64,
    /// Pain-free weight
    pub pain_free: f64,
}

impl ReadinessWeights {
    /// Sum of all weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.strength + self.weeks + self.mobility + self.pain_free
    }
}

impl Default for ReadinessWeights {
    fn default() -> Self {
        Self {
            strength: 0.4,
            weeks: 0.2,
            mobility: 0.3,
            pain_free: 0.1,
        }
    }
}

/// One tracked equipment-tier transition, e.g. dumbbell bench to barbell bench
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionTarget {
    /// Stable identifier, e.g. `barbell_bench`
    pub id: String,
    /// Exercise being worked toward
    pub name: String,
    /// History key of the exercise whose progress is measured
    pub source_key: String,
    /// Load the source exercise must reach
    pub target_weight: f64,
    /// Reps every set of the latest session must reach
    pub target_reps: u32,
    /// Minimum average RIR of the latest session
    pub min_rir: f64,
    /// Weeks between first and latest source session
    pub target_weeks: u32,
    /// Mobility criteria key checked for a trailing "yes" streak
    pub mobility_criteria_key: String,
    /// Length of the required "yes" streak
    pub mobility_required: u32,
    /// History keys whose pain reports count toward this transition
    pub pain_exercise_keys: Vec<String>,
    /// Body locations relevant to this transition
    pub pain_locations: Vec<String>,
    /// Most recent reports examined per exercise key
    pub pain_required_sessions: usize,
    /// Painful reports tolerated within that window
    pub max_painful_sessions: usize,
}

/// Readiness Scorer Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Composite weights
    pub weights: ReadinessWeights,
    /// Share of the strength score earned by load alone
    pub strength_load_points: f64,
    /// Share of the strength score earned by hitting reps at target RIR
    pub strength_quality_points: f64,
    /// Tracked transitions
    pub transitions: Vec<TransitionTarget>,
}

impl ReadinessConfig {
    /// Transition by identifier
    #[must_use]
    pub fn transition(&self, id: &str) -> Option<&TransitionTarget> {
        self.transitions.iter().find(|target| target.id == id)
    }
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| (*s).to_owned()).collect() };
        Self {
            weights: ReadinessWeights::default(),
            strength_load_points: 80.0,
            strength_quality_points: 20.0,
            transitions: vec![
                TransitionTarget {
                    id: "barbell_bench".into(),
                    name: "Barbell Bench Press".into(),
                    source_key: "Upper A - Dumbbell Bench Press".into(),
                    target_weight: 25.0,
                    target_reps: 10,
                    min_rir: 2.0,
                    target_weeks: 8,
                    mobility_criteria_key: "shoulder_mobility".into(),
                    mobility_required: 3,
                    pain_exercise_keys: owned(&[
                        "Upper A - Dumbbell Bench Press",
                        "Upper B - Dumbbell Shoulder Press",
                    ]),
                    pain_locations: owned(&["shoulder", "elbow", "wrist"]),
                    pain_required_sessions: 5,
                    max_painful_sessions: 1,
                },
                TransitionTarget {
                    id: "barbell_squat".into(),
                    name: "Barbell Back Squat".into(),
                    source_key: "Lower A - Goblet Squat".into(),
                    target_weight: 32.0,
                    target_reps: 12,
                    min_rir: 2.0,
                    target_weeks: 8,
                    mobility_criteria_key: "squat_depth".into(),
                    mobility_required: 3,
                    pain_exercise_keys: owned(&[
                        "Lower A - Goblet Squat",
                        "Lower B - Bulgarian Split Squat",
                    ]),
                    pain_locations: owned(&["knee", "hip", "lower back"]),
                    pain_required_sessions: 5,
                    max_painful_sessions: 1,
                },
                TransitionTarget {
                    id: "barbell_deadlift".into(),
                    name: "Barbell Deadlift".into(),
                    source_key: "Lower B - Dumbbell Romanian Deadlift".into(),
                    target_weight: 30.0,
                    target_reps: 10,
                    min_rir: 2.0,
                    target_weeks: 8,
                    mobility_criteria_key: "hip_hinge".into(),
                    mobility_required: 3,
                    pain_exercise_keys: owned(&["Lower B - Dumbbell Romanian Deadlift"]),
                    pain_locations: owned(&["lower back", "hamstring", "hip"]),
                    pain_required_sessions: 5,
                    max_painful_sessions: 1,
                },
            ],
        }
    }
}
