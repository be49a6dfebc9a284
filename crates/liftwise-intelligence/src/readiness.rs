// ABOUTME: Readiness scorer producing a weighted percentage for equipment-tier transitions
// ABOUTME: Combines strength, training weeks, mobility streak, and pain-free sub-scores with blockers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! Readiness Scorer
//!
//! Each tracked transition gets four sub-scores in `0..=100`. A met criterion contributes
//! its full weight regardless of its sub-score, so a transition with every criterion met
//! scores exactly 100. Unmet criteria produce one blocker line each.

use crate::config::intelligence::{ReadinessConfig, TransitionTarget};
use liftwise_core::constants::time::DAYS_PER_WEEK;
use liftwise_core::errors::{AppError, AppResult};
use liftwise_core::models::{ExerciseKey, MobilityCheck, SessionEntry};
use liftwise_core::storage::TrainingRepository;
use serde::Serialize;
use tracing::{debug, warn};

/// One criterion's state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriterionProgress {
    /// Criterion fully satisfied
    pub met: bool,
    /// Sub-score in `0..=100`
    pub progress: f64,
}

impl CriterionProgress {
    fn ratio(current: f64, target: f64) -> Self {
        let progress = if target > 0.0 {
            (current / target).clamp(0.0, 1.0) * 100.0
        } else {
            100.0
        };
        Self {
            met: current >= target,
            progress,
        }
    }

    const fn flag(met: bool) -> Self {
        Self {
            met,
            progress: if met { 100.0 } else { 0.0 },
        }
    }

    fn contribution(self, weight: f64) -> f64 {
        weight * if self.met { 100.0 } else { self.progress }
    }
}

/// Readiness for one transition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    /// Transition identifier
    pub id: String,
    /// Exercise being worked toward
    pub name: String,
    /// Weighted percentage in `0..=100`
    pub percentage: u8,
    /// Every criterion met
    pub ready: bool,
    /// First-set load of the latest source session
    pub current_weight: f64,
    /// Whole weeks between first and latest source session
    pub weeks_trained: i64,
    /// Trailing "yes" mobility checks
    pub mobility_streak: u32,
    /// Strength progress
    pub strength: CriterionProgress,
    /// Training weeks progress
    pub weeks: CriterionProgress,
    /// Mobility streak progress
    pub mobility: CriterionProgress,
    /// Pain-free status
    pub pain_free: CriterionProgress,
    /// One line per unmet criterion
    pub blockers: Vec<String>,
}

/// Weighted readiness scorer
pub struct ReadinessScorer<'a, R: ?Sized> {
    repo: &'a R,
    config: &'a ReadinessConfig,
}

impl<'a, R: TrainingRepository + ?Sized> ReadinessScorer<'a, R> {
    /// Create a scorer reading from `repo`
    pub const fn new(repo: &'a R, config: &'a ReadinessConfig) -> Self {
        Self { repo, config }
    }

    /// Score every configured transition
    pub fn score_all(&self) -> Vec<ReadinessReport> {
        self.config
            .transitions
            .iter()
            .map(|target| self.score(target))
            .collect()
    }

    /// Score a configured transition by identifier
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown identifier
    pub fn score_by_id(&self, id: &str) -> AppResult<ReadinessReport> {
        self.config
            .transition(id)
            .map(|target| self.score(target))
            .ok_or_else(|| AppError::not_found(format!("transition '{id}'")))
    }

    /// Score one transition; corrupt data yields a zero report with an evaluation-error blocker
    pub fn score(&self, target: &TransitionTarget) -> ReadinessReport {
        self.try_score(target).unwrap_or_else(|e| {
            warn!(transition = %target.id, error = %e, "Readiness scoring failed");
            ReadinessReport {
                id: target.id.clone(),
                name: target.name.clone(),
                percentage: 0,
                ready: false,
                current_weight: 0.0,
                weeks_trained: 0,
                mobility_streak: 0,
                strength: CriterionProgress::flag(false),
                weeks: CriterionProgress::flag(false),
                mobility: CriterionProgress::flag(false),
                pain_free: CriterionProgress::flag(false),
                blockers: vec!["evaluation error".to_owned()],
            }
        })
    }

    fn try_score(&self, target: &TransitionTarget) -> AppResult<ReadinessReport> {
        let source = ExerciseKey::parse(&target.source_key)?;
        let history = self.repo.exercise_history(&source);
        for entry in &history {
            entry.validate()?;
        }

        let current_weight = history
            .last()
            .and_then(SessionEntry::first_weight)
            .unwrap_or(0.0);
        let strength = self.strength_progress(target, &history, current_weight);

        let weeks_trained = weeks_between_first_and_last(&history);
        let weeks = CriterionProgress::ratio(weeks_trained as f64, f64::from(target.target_weeks));

        let mobility_streak = trailing_pass_streak(&self.repo.mobility_checks(&target.mobility_criteria_key));
        let mobility = CriterionProgress::ratio(
            f64::from(mobility_streak),
            f64::from(target.mobility_required),
        );

        let pain_free = CriterionProgress::flag(self.pain_free(target)?);

        let weights = &self.config.weights;
        let total = strength.contribution(weights.strength)
            + weeks.contribution(weights.weeks)
            + mobility.contribution(weights.mobility)
            + pain_free.contribution(weights.pain_free);
        // Tolerate float error so that four met criteria land on exactly 100
        let percentage = (total + 1e-9).floor().clamp(0.0, 100.0) as u8;

        let mut blockers = Vec::new();
        if !strength.met {
            blockers.push(if current_weight < target.target_weight {
                format!(
                    "Need {:.1} more on {} (at {current_weight}, target {})",
                    target.target_weight - current_weight,
                    source.exercise_name(),
                    target.target_weight
                )
            } else {
                format!(
                    "Hit {} reps on every set at RIR {}+ on {}",
                    target.target_reps,
                    target.min_rir,
                    source.exercise_name()
                )
            });
        }
        if !weeks.met {
            blockers.push(format!(
                "Need {} more weeks of training",
                i64::from(target.target_weeks) - weeks_trained
            ));
        }
        if !mobility.met {
            blockers.push(format!(
                "Need {} more consecutive passing {} checks",
                target.mobility_required.saturating_sub(mobility_streak),
                target.mobility_criteria_key
            ));
        }
        if !pain_free.met {
            blockers.push(format!(
                "Recent pain in {}",
                target.pain_locations.join(", ")
            ));
        }

        debug!(transition = %target.id, percentage, blockers = blockers.len(), "Readiness scored");
        Ok(ReadinessReport {
            id: target.id.clone(),
            name: target.name.clone(),
            percentage,
            ready: blockers.is_empty(),
            current_weight,
            weeks_trained,
            mobility_streak,
            strength,
            weeks,
            mobility,
            pain_free,
            blockers,
        })
    }

    fn strength_progress(
        &self,
        target: &TransitionTarget,
        history: &[SessionEntry],
        current_weight: f64,
    ) -> CriterionProgress {
        let load_ratio = if target.target_weight > 0.0 {
            (current_weight / target.target_weight).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let quality = history.last().is_some_and(|session| {
            !session.sets.is_empty()
                && session.sets.iter().all(|set| set.reps >= target.target_reps)
                && average_rir(session) >= target.min_rir
        });
        let progress = load_ratio * self.config.strength_load_points
            + if quality {
                self.config.strength_quality_points
            } else {
                0.0
            };
        CriterionProgress {
            met: current_weight >= target.target_weight && quality,
            progress: progress.clamp(0.0, 100.0),
        }
    }

    /// At most `max_painful_sessions` relevant painful reports among the latest
    /// `pain_required_sessions` for every tracked key; short histories pass
    fn pain_free(&self, target: &TransitionTarget) -> AppResult<bool> {
        for raw_key in &target.pain_exercise_keys {
            let key = ExerciseKey::parse(raw_key)?;
            let reports = self.repo.pain_history(&key);
            if reports.len() < target.pain_required_sessions {
                continue;
            }
            let painful = reports[reports.len() - target.pain_required_sessions..]
                .iter()
                .filter(|report| report.is_painful_at(&target.pain_locations))
                .count();
            if painful > target.max_painful_sessions {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn average_rir(session: &SessionEntry) -> f64 {
    if session.sets.is_empty() {
        return 0.0;
    }
    session.sets.iter().map(|set| set.rir).sum::<f64>() / session.sets.len() as f64
}

/// Whole weeks between the first and latest session; zero below two sessions
fn weeks_between_first_and_last(history: &[SessionEntry]) -> i64 {
    match (history.first(), history.last()) {
        (Some(first), Some(last)) if history.len() >= 2 => {
            (last.date - first.date).num_days().max(0) / DAYS_PER_WEEK
        }
        _ => 0,
    }
}

/// Passing checks since the most recent non-pass
fn trailing_pass_streak(checks: &[MobilityCheck]) -> u32 {
    let streak = checks
        .iter()
        .rev()
        .take_while(|check| check.response.is_pass())
        .count();
    u32::try_from(streak).unwrap_or(u32::MAX)
}
