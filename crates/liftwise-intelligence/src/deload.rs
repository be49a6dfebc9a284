// ABOUTME: Deload lifecycle controller with time, performance, and fatigue trigger strategies
// ABOUTME: Inactive to active to inactive, one cycle per deload, persisted as a single record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! Deload Controller
//!
//! Triggers are evaluated in order and the first match wins:
//!
//! - **time**: whole weeks since the last deload reach the phase threshold. A user who
//!   never deloaded has zero weeks and is never triggered.
//! - **performance**: enough exercises regress at once. Off unless
//!   `performance_trigger_enabled` is set and a counting [`DeloadSignals`] is supplied.
//! - **fatigue**: the most recent session fatigue scores all reach the threshold.
//!
//! [`ReservedSignals`] reports no regressions and no fatigue scores, so only the time
//! trigger fires by default.

use crate::config::intelligence::DeloadConfig;
use crate::performance_analyzer::PerformanceAnalyzer;
use crate::phase_policy::PhasePolicy;
use chrono::{DateTime, Duration, Utc};
use liftwise_core::constants::time::{DAYS_PER_WEEK, MILLIS_PER_DAY};
use liftwise_core::errors::{AppError, AppResult};
use liftwise_core::models::{DeloadState, DeloadType, ExerciseKey};
use liftwise_core::storage::TrainingRepository;
use serde::Serialize;
use tracing::{debug, info};

/// Inputs for the performance and fatigue triggers
pub trait DeloadSignals {
    /// Exercises currently regressing
    fn regressing_exercise_count(&self) -> u32;

    /// Session fatigue scores, oldest first
    fn recent_fatigue_scores(&self) -> Vec<f64>;
}

/// Signals that never trigger a deload
#[derive(Debug, Clone, Copy, Default)]
pub struct ReservedSignals;

impl DeloadSignals for ReservedSignals {
    fn regressing_exercise_count(&self) -> u32 {
        0
    }

    fn recent_fatigue_scores(&self) -> Vec<f64> {
        Vec::new()
    }
}

/// Counts regressing exercises with the performance analyzer
pub struct RegressionSignals<'a, R: ?Sized> {
    analyzer: PerformanceAnalyzer<'a, R>,
    keys: Vec<ExerciseKey>,
}

impl<'a, R: TrainingRepository + ?Sized> RegressionSignals<'a, R> {
    /// Watch `keys` for regressions
    pub const fn new(analyzer: PerformanceAnalyzer<'a, R>, keys: Vec<ExerciseKey>) -> Self {
        Self { analyzer, keys }
    }
}

impl<R: TrainingRepository + ?Sized> DeloadSignals for RegressionSignals<'_, R> {
    fn regressing_exercise_count(&self) -> u32 {
        self.analyzer.count_regressing_exercises(&self.keys)
    }

    fn recent_fatigue_scores(&self) -> Vec<f64> {
        Vec::new()
    }
}

/// Why a deload was recommended
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DeloadReason {
    /// Too long since the last deload
    Time {
        /// Whole weeks since the last deload
        weeks: i64,
    },
    /// Several exercises regressing together
    Performance {
        /// Regressing exercise count
        regressions: u32,
    },
    /// Sustained high session fatigue
    Fatigue {
        /// Most recent fatigue score
        score: f64,
    },
}

/// Trigger decision, serialized flat as `{"trigger":true,"reason":"time","weeks":6}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeloadTrigger {
    /// Whether a deload should start
    pub trigger: bool,
    /// Matching strategy when triggered
    #[serde(flatten)]
    pub reason: Option<DeloadReason>,
}

impl DeloadTrigger {
    /// No deload recommended
    #[must_use]
    pub const fn none() -> Self {
        Self {
            trigger: false,
            reason: None,
        }
    }

    const fn fired(reason: DeloadReason) -> Self {
        Self {
            trigger: true,
            reason: Some(reason),
        }
    }
}

/// Whole weeks since the last completed deload; zero if there never was one
#[must_use]
pub fn weeks_since_last_deload(state: &DeloadState, now: DateTime<Utc>) -> i64 {
    state
        .last_deload_date
        .map_or(0, |last| (now - last).num_days().max(0) / DAYS_PER_WEEK)
}

/// Deload lifecycle controller
pub struct DeloadController<'a, R: ?Sized, S = ReservedSignals> {
    repo: &'a R,
    config: &'a DeloadConfig,
    signals: S,
}

impl<'a, R: TrainingRepository + ?Sized> DeloadController<'a, R> {
    /// Controller with the reserved never-trigger signals
    pub const fn new(repo: &'a R, config: &'a DeloadConfig) -> Self {
        Self {
            repo,
            config,
            signals: ReservedSignals,
        }
    }
}

impl<'a, R: TrainingRepository + ?Sized, S: DeloadSignals> DeloadController<'a, R, S> {
    /// Replace the performance and fatigue inputs
    pub fn with_signals<T: DeloadSignals>(self, signals: T) -> DeloadController<'a, R, T> {
        DeloadController {
            repo: self.repo,
            config: self.config,
            signals,
        }
    }

    /// Current persisted state
    pub fn state(&self) -> DeloadState {
        self.repo.deload_state()
    }

    /// Whether a deload should start now
    pub fn should_trigger_deload(&self) -> DeloadTrigger {
        self.should_trigger_deload_at(Utc::now())
    }

    /// Whether a deload should start at `now`
    pub fn should_trigger_deload_at(&self, now: DateTime<Utc>) -> DeloadTrigger {
        let state = self.repo.deload_state();
        if state.active {
            return DeloadTrigger::none();
        }

        let policy = PhasePolicy::current(self.repo);
        let threshold = policy.deload_sensitivity().threshold_weeks(self.config);
        let weeks = weeks_since_last_deload(&state, now);
        debug!(phase = %policy.phase, weeks, threshold, "Evaluating deload triggers");

        if state.last_deload_date.is_some() && weeks >= threshold {
            return DeloadTrigger::fired(DeloadReason::Time { weeks });
        }

        if self.config.performance_trigger_enabled {
            let regressions = self.signals.regressing_exercise_count();
            if regressions >= self.config.regression_count_threshold {
                return DeloadTrigger::fired(DeloadReason::Performance { regressions });
            }
        }

        let scores = self.signals.recent_fatigue_scores();
        let window = self.config.fatigue_consecutive_sessions;
        if window > 0 && scores.len() >= window {
            let recent = &scores[scores.len() - window..];
            if recent
                .iter()
                .all(|score| *score >= self.config.fatigue_score_threshold)
            {
                let score = recent[recent.len() - 1];
                return DeloadTrigger::fired(DeloadReason::Fatigue { score });
            }
        }

        DeloadTrigger::none()
    }

    /// Start a deload now
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if a deload is already active, or a storage error
    pub fn start_deload(&self, deload_type: DeloadType) -> AppResult<DeloadState> {
        self.start_deload_at(deload_type, Utc::now())
    }

    /// Start a deload at `now` lasting the configured number of days
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if a deload is already active, or a storage error
    pub fn start_deload_at(
        &self,
        deload_type: DeloadType,
        now: DateTime<Utc>,
    ) -> AppResult<DeloadState> {
        let current = self.repo.deload_state();
        if current.active {
            return Err(AppError::invalid_state(
                "a deload is already active; end it before starting another",
            ));
        }

        let state = DeloadState {
            active: true,
            deload_type: Some(deload_type),
            start_date: Some(now),
            end_date: Some(now + Duration::days(self.config.duration_days)),
            ..current
        };
        self.repo.save_deload_state(&state)?;
        info!(deload_type = %deload_type, end_date = ?state.end_date, "Deload started");
        Ok(state)
    }

    /// End the active deload, recording its start as the last deload date
    ///
    /// Ending when nothing is active leaves the state untouched.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails
    pub fn end_deload(&self) -> AppResult<DeloadState> {
        let current = self.repo.deload_state();
        if !current.active {
            info!("No active deload to end");
            return Ok(current);
        }

        let state = DeloadState {
            active: false,
            deload_type: None,
            start_date: None,
            end_date: None,
            last_deload_date: current.start_date.or(current.last_deload_date),
            dismissed_count: current.dismissed_count,
        };
        self.repo.save_deload_state(&state)?;
        info!(last_deload_date = ?state.last_deload_date, "Deload ended");
        Ok(state)
    }

    /// Dismiss a recommended deload for now
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails
    pub fn postpone_deload(&self) -> AppResult<DeloadState> {
        let mut state = self.repo.deload_state();
        state.dismissed_count = state.dismissed_count.saturating_add(1);
        self.repo.save_deload_state(&state)?;
        info!(dismissed_count = state.dismissed_count, "Deload postponed");
        Ok(state)
    }

    /// Whole days left in the active deload, rounded up
    pub fn days_remaining(&self) -> i64 {
        self.days_remaining_at(Utc::now())
    }

    /// Whole days left at `now`, rounded up; zero when inactive or past the end
    pub fn days_remaining_at(&self, now: DateTime<Utc>) -> i64 {
        let state = self.repo.deload_state();
        match state.end_date {
            Some(end) if state.active => {
                let millis = (end - now).num_milliseconds();
                if millis <= 0 {
                    0
                } else {
                    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
                }
            }
            _ => 0,
        }
    }

    /// Whether the active deload has run past its end date
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let state = self.repo.deload_state();
        state.active && state.end_date.is_some_and(|end| now >= end)
    }
}
