// ABOUTME: Deload controller configuration for time, performance, and fatigue triggers
// ABOUTME: Week thresholds are selected by the phase's deload sensitivity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use serde::{Deserialize, Serialize};

/// Deload Controller Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeloadConfig {
    /// Weeks between deloads at normal sensitivity
    pub normal_threshold_weeks: i64,
    /// Weeks between deloads at high sensitivity
    pub high_threshold_weeks: i64,
    /// Weeks between deloads at very high sensitivity
    pub very_high_threshold_weeks: i64,
    /// Length of a deload once started
    pub duration_days: i64,
    /// Exercises regressing at once that trigger a deload
    pub regression_count_threshold: u32,
    /// Session fatigue score that counts as high
    pub fatigue_score_threshold: f64,
    /// Consecutive high-fatigue sessions that trigger a deload
    pub fatigue_consecutive_sessions: usize,
    /// Count real regressions instead of the reserved zero signal
    pub performance_trigger_enabled: bool,
}

impl Default for DeloadConfig {
    fn default() -> Self {
        Self {
            normal_threshold_weeks: 6,
            high_threshold_weeks: 4,
            very_high_threshold_weeks: 2,
            duration_days: 7,
            regression_count_threshold: 2,
            fatigue_score_threshold: 8.0,
            fatigue_consecutive_sessions: 2,
            performance_trigger_enabled: false,
        }
    }
}
