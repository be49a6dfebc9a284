// ABOUTME: Conservative regression and form-breakdown detector running independently of progression
// ABOUTME: Fails open to a good status on any data problem and stays silent during a deload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! Performance Analyzer
//!
//! Checks run in order and the first match wins:
//!
//! 1. weight regression against the previous session (alert)
//! 2. average-rep drop against the session before the latest (alert)
//! 3. intra-set rep spread in the analyzed sets (warning)
//! 4. every analyzed set at or below the low-RIR ceiling (warning)
//!
//! The analyzed sets are the in-progress sets when given, otherwise the latest session.

use crate::config::intelligence::PerformanceAnalyzerConfig;
use liftwise_core::errors::AppResult;
use liftwise_core::models::{ExerciseKey, SessionEntry, WorkoutSet};
use liftwise_core::storage::TrainingRepository;
use serde::Serialize;
use tracing::{debug, warn};

/// Severity of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceStatus {
    /// Nothing to report
    Good,
    /// Form may be breaking down
    Warning,
    /// Performance is regressing
    Alert,
}

/// Which check produced a non-good status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceSignal {
    /// First-set load went down
    WeightRegression,
    /// Average reps fell past the drop threshold
    RepDrop,
    /// Reps spread too widely across sets
    IntraSetVariance,
    /// Every set ground close to failure
    LowRir,
}

/// Result of one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceAnalysis {
    /// Overall status
    pub status: PerformanceStatus,
    /// Triggering check, absent when good
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<PerformanceSignal>,
    /// Human-readable explanation, absent when good
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PerformanceAnalysis {
    /// No alarm
    #[must_use]
    pub const fn good() -> Self {
        Self {
            status: PerformanceStatus::Good,
            signal: None,
            message: None,
        }
    }

    fn flagged(status: PerformanceStatus, signal: PerformanceSignal, message: String) -> Self {
        Self {
            status,
            signal: Some(signal),
            message: Some(message),
        }
    }
}

/// Regression and form-breakdown analyzer
pub struct PerformanceAnalyzer<'a, R: ?Sized> {
    repo: &'a R,
    config: &'a PerformanceAnalyzerConfig,
}

impl<'a, R: TrainingRepository + ?Sized> PerformanceAnalyzer<'a, R> {
    /// Create an analyzer reading from `repo`
    pub const fn new(repo: &'a R, config: &'a PerformanceAnalyzerConfig) -> Self {
        Self { repo, config }
    }

    /// Analyze one exercise, optionally including sets from the session in progress
    ///
    /// Always `good` while a deload is active. Corrupt records are logged and
    /// reported as `good`.
    pub fn analyze_exercise_performance(
        &self,
        key: &ExerciseKey,
        current_sets: Option<&[WorkoutSet]>,
    ) -> PerformanceAnalysis {
        if self.repo.deload_state().active {
            debug!(exercise_key = %key, "Deload active, skipping performance analysis");
            return PerformanceAnalysis::good();
        }

        match self.try_analyze(key, current_sets) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(exercise_key = %key, error = %e, "Performance analysis failed, reporting good");
                PerformanceAnalysis::good()
            }
        }
    }

    /// Number of exercises currently analyzed as `alert`
    pub fn count_regressing_exercises(&self, keys: &[ExerciseKey]) -> u32 {
        let count = keys
            .iter()
            .filter(|key| {
                self.analyze_exercise_performance(key, None).status == PerformanceStatus::Alert
            })
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    fn try_analyze(
        &self,
        key: &ExerciseKey,
        current_sets: Option<&[WorkoutSet]>,
    ) -> AppResult<PerformanceAnalysis> {
        let history = self.repo.exercise_history(key);
        for entry in &history {
            entry.validate()?;
        }
        if let Some(sets) = current_sets {
            for set in sets {
                set.validate()?;
            }
        }

        if let Some(analysis) = self.check_history(&history) {
            debug!(exercise_key = %key, signal = ?analysis.signal, "Regression detected");
            return Ok(analysis);
        }

        let analyzed: Vec<&WorkoutSet> = current_sets
            .filter(|sets| !sets.is_empty())
            .or_else(|| history.last().map(|entry| entry.sets.as_slice()))
            .unwrap_or_default()
            .iter()
            .filter(|set| set.reps > 0)
            .collect();

        Ok(self
            .check_sets(&analyzed)
            .unwrap_or_else(PerformanceAnalysis::good))
    }

    fn check_history(&self, history: &[SessionEntry]) -> Option<PerformanceAnalysis> {
        if history.len() < self.config.min_history_entries.max(2) {
            return None;
        }
        let last = &history[history.len() - 1];
        let previous = &history[history.len() - 2];

        if let (Some(current), Some(before)) = (last.first_weight(), previous.first_weight()) {
            if current < before {
                return Some(PerformanceAnalysis::flagged(
                    PerformanceStatus::Alert,
                    PerformanceSignal::WeightRegression,
                    format!("Load dropped from {before} to {current}"),
                ));
            }
        }

        if let (Some(current), Some(before)) = (last.average_reps(), previous.average_reps()) {
            if before > 0.0 {
                let fall = (before - current) / before;
                if fall >= self.config.rep_drop_threshold {
                    return Some(PerformanceAnalysis::flagged(
                        PerformanceStatus::Alert,
                        PerformanceSignal::RepDrop,
                        format!("Average reps fell {:.0}% ({before:.1} to {current:.1})", fall * 100.0),
                    ));
                }
            }
        }

        None
    }

    fn check_sets(&self, sets: &[&WorkoutSet]) -> Option<PerformanceAnalysis> {
        if sets.is_empty() {
            return None;
        }

        if sets.len() >= self.config.min_sets_for_variance {
            let max_reps = sets.iter().map(|set| set.reps).max().unwrap_or(0);
            let min_reps = sets.iter().map(|set| set.reps).min().unwrap_or(0);
            if max_reps > 0 {
                let spread = f64::from(max_reps - min_reps) / f64::from(max_reps);
                if spread >= self.config.intra_set_variance_threshold {
                    return Some(PerformanceAnalysis::flagged(
                        PerformanceStatus::Warning,
                        PerformanceSignal::IntraSetVariance,
                        format!("Form breaking down: reps ranged {min_reps} to {max_reps}"),
                    ));
                }
            }
        }

        if sets.iter().all(|set| set.rir <= self.config.low_rir_ceiling) {
            return Some(PerformanceAnalysis::flagged(
                PerformanceStatus::Warning,
                PerformanceSignal::LowRir,
                format!(
                    "Every set at RIR {} or lower; consider backing off",
                    self.config.low_rir_ceiling
                ),
            ));
        }

        None
    }
}
