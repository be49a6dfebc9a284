// ABOUTME: Performance analyzer configuration for regression and form-breakdown detection
// ABOUTME: Thresholds are deliberately wide so that alerts fire only on clear patterns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! Performance Analyzer Configuration

use serde::{Deserialize, Serialize};

/// Performance Analyzer Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceAnalyzerConfig {
    /// Sessions needed before comparing loads or reps across sessions
    pub min_history_entries: usize,
    /// Fractional drop in average reps that raises an alert
    pub rep_drop_threshold: f64,
    /// `(max - min) / max` reps across sets that raises a warning
    pub intra_set_variance_threshold: f64,
    /// Sets needed for the variance check to mean anything
    pub min_sets_for_variance: usize,
    /// Every set at or below this RIR raises a warning
    pub low_rir_ceiling: f64,
}

impl Default for PerformanceAnalyzerConfig {
    fn default() -> Self {
        Self {
            min_history_entries: 2,
            rep_drop_threshold: 0.25,
            intra_set_variance_threshold: 0.5,
            min_sets_for_variance: 2,
            low_rir_ceiling: 1.0,
        }
    }
}
