// ABOUTME: Unlock evaluator gating harder exercise variants behind prerequisite criteria
// ABOUTME: Adds equipment-type classification and phase-aware priority ranking of candidates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! Unlock Evaluator
//!
//! A target unlocks when every criterion its complexity tier requires holds against the
//! prerequisite exercise. Criteria the tier does not require count as met. Simple-tier
//! targets and targets already recorded as unlocked short-circuit to unlocked.

use crate::config::intelligence::{ComplexityTier, UnlockConfig};
use crate::phase_policy::{PhasePolicy, UnlockPriority};
use chrono::{DateTime, Utc};
use liftwise_core::constants::time::DAYS_PER_WEEK;
use liftwise_core::errors::{AppError, AppResult};
use liftwise_core::models::{CriteriaSnapshot, ExerciseKey, SessionEntry};
use liftwise_core::storage::TrainingRepository;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Rank given to locked targets and to targets the phase excludes
pub const EXCLUDED_PRIORITY: u32 = 999;

/// Reason reported when an evaluation could not complete
pub const EVALUATION_ERROR: &str = "evaluation error";

/// Equipment type inferred from the exercise name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    /// Loaded barbell lift
    Barbell,
    /// Bodyweight movement
    Bodyweight,
    /// Dumbbell or kettlebell movement
    Traditional,
    /// Machine, cable, or band movement
    Equipment,
}

/// Outcome of evaluating one target against one prerequisite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockEvaluation {
    /// Exercise being unlocked
    pub target: String,
    /// Exercise key the criteria were measured on
    pub prerequisite: String,
    /// Complexity tier of the target
    pub tier: ComplexityTier,
    /// Whether every required criterion is met
    pub unlocked: bool,
    /// Target was already recorded as unlocked
    pub already_recorded: bool,
    /// Per-criterion outcome
    pub criteria: CriteriaSnapshot,
    /// Labels of the unmet criteria
    pub missing: Vec<String>,
    /// Set when the evaluation failed and fell back to locked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl UnlockEvaluation {
    fn evaluation_error(target: &str, prerequisite: &ExerciseKey) -> Self {
        Self {
            target: target.to_owned(),
            prerequisite: prerequisite.to_string(),
            tier: ComplexityTier::Simple,
            unlocked: false,
            already_recorded: false,
            criteria: CriteriaSnapshot::default(),
            missing: Vec::new(),
            reason: Some(EVALUATION_ERROR.to_owned()),
        }
    }
}

/// Evaluation plus phase-aware ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedUnlock {
    /// Underlying evaluation
    #[serde(flatten)]
    pub evaluation: UnlockEvaluation,
    /// Inferred equipment type
    pub exercise_type: ExerciseType,
    /// 1 is highest; [`EXCLUDED_PRIORITY`] means not offered
    pub priority: u32,
}

/// Criteria-gated unlock evaluator
pub struct UnlockEvaluator<'a, R: ?Sized> {
    repo: &'a R,
    config: &'a UnlockConfig,
}

impl<'a, R: TrainingRepository + ?Sized> UnlockEvaluator<'a, R> {
    /// Create an evaluator reading from `repo`
    pub const fn new(repo: &'a R, config: &'a UnlockConfig) -> Self {
        Self { repo, config }
    }

    /// Complexity tier of `name`; unknown names are simple
    pub fn tier(&self, name: &str) -> ComplexityTier {
        let known = self
            .config
            .exercise_tiers
            .iter()
            .find(|(exercise, _)| exercise.eq_ignore_ascii_case(name.trim()))
            .map(|(_, tier)| *tier);
        known.unwrap_or_else(|| {
            warn!(exercise = name, "Exercise has no complexity tier, treating as simple");
            ComplexityTier::Simple
        })
    }

    /// Catalog spelling of `name`, or the trimmed input when the catalog does not list it
    #[must_use]
    pub fn canonical_name(&self, name: &str) -> String {
        let name = name.trim();
        self.config
            .exercise_tiers
            .iter()
            .find(|(exercise, _)| exercise.eq_ignore_ascii_case(name))
            .map_or_else(|| name.to_owned(), |(exercise, _)| exercise.clone())
    }

    /// Equipment type by keyword match on the name
    #[must_use]
    pub fn classify(&self, name: &str) -> ExerciseType {
        let lowered = name.to_lowercase();
        let has_keyword = |keywords: &[String]| keywords.iter().any(|word| lowered.contains(word.as_str()));
        let keywords = &self.config.type_keywords;
        if has_keyword(&keywords.barbell) {
            ExerciseType::Barbell
        } else if has_keyword(&keywords.bodyweight) {
            ExerciseType::Bodyweight
        } else if has_keyword(&keywords.equipment) {
            ExerciseType::Equipment
        } else {
            ExerciseType::Traditional
        }
    }

    /// Evaluate `target` against the history of `prerequisite`
    pub fn evaluate_unlock(&self, target: &str, prerequisite: &ExerciseKey) -> UnlockEvaluation {
        self.evaluate_unlock_at(target, prerequisite, Utc::now())
    }

    /// Evaluate at a fixed time; failures come back locked with an evaluation-error reason
    pub fn evaluate_unlock_at(
        &self,
        target: &str,
        prerequisite: &ExerciseKey,
        now: DateTime<Utc>,
    ) -> UnlockEvaluation {
        match self.try_evaluate(target, prerequisite, now) {
            Ok(evaluation) => evaluation,
            Err(e) => {
                warn!(exercise = target, prerequisite = %prerequisite, error = %e, "Unlock evaluation failed");
                UnlockEvaluation::evaluation_error(target, prerequisite)
            }
        }
    }

    fn try_evaluate(
        &self,
        target: &str,
        prerequisite: &ExerciseKey,
        now: DateTime<Utc>,
    ) -> AppResult<UnlockEvaluation> {
        let canonical = self.canonical_name(target);
        let target = canonical.as_str();
        if target.is_empty() {
            return Err(AppError::missing_field("target"));
        }

        let tier = self.tier(target);
        let already_recorded = self.repo.is_exercise_unlocked(target);
        if tier == ComplexityTier::Simple || already_recorded {
            return Ok(UnlockEvaluation {
                target: target.to_owned(),
                prerequisite: prerequisite.to_string(),
                tier,
                unlocked: true,
                already_recorded,
                criteria: CriteriaSnapshot::all_met(),
                missing: Vec::new(),
                reason: None,
            });
        }

        let requirements = self.config.requirements(tier);
        let history = self.repo.exercise_history(prerequisite);
        for entry in &history {
            entry.validate()?;
        }

        let criteria = CriteriaSnapshot {
            strength_milestone: !requirements.strength_milestone
                || self.strength_met(prerequisite, target, &history),
            mobility_check: !requirements.mobility_check || self.mobility_met(target),
            pain_free: requirements.pain_free_workouts == 0
                || self.pain_free_met(prerequisite, &history, requirements.pain_free_workouts),
            training_weeks: requirements.training_weeks == 0
                || training_weeks(&history, now) >= i64::from(requirements.training_weeks),
        };

        let missing: Vec<String> = [
            (criteria.strength_milestone, "strengthMilestone"),
            (criteria.mobility_check, "mobilityCheck"),
            (criteria.pain_free, "painFree"),
            (criteria.training_weeks, "trainingWeeks"),
        ]
        .into_iter()
        .filter(|(met, _)| !met)
        .map(|(_, label)| label.to_owned())
        .collect();

        debug!(exercise = target, prerequisite = %prerequisite, ?missing, "Unlock evaluated");
        Ok(UnlockEvaluation {
            target: target.to_owned(),
            prerequisite: prerequisite.to_string(),
            tier,
            unlocked: criteria.is_complete(),
            already_recorded,
            criteria,
            missing,
            reason: None,
        })
    }

    fn strength_met(&self, prerequisite: &ExerciseKey, target: &str, history: &[SessionEntry]) -> bool {
        let Some(milestone) = self.config.milestone(prerequisite.exercise_name(), target) else {
            debug!(exercise = target, prerequisite = %prerequisite, "No strength milestone registered");
            return false;
        };
        history
            .iter()
            .rev()
            .take(self.config.strength_window_sessions)
            .any(|session| {
                session
                    .sets
                    .iter()
                    .filter(|set| set.weight >= milestone.weight && set.reps >= milestone.reps)
                    .count()
                    >= milestone.sets
            })
    }

    fn mobility_met(&self, target: &str) -> bool {
        let Some(criteria_key) = self
            .config
            .mobility_criteria
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(target))
            .map(|(_, key)| key)
        else {
            debug!(exercise = target, "No mobility criterion registered");
            return false;
        };
        let checks = self.repo.mobility_checks(criteria_key);
        let required = self.config.mobility_required_checks;
        checks.len() >= required
            && checks[checks.len() - required..]
                .iter()
                .all(|check| check.response.is_pass())
    }

    fn pain_free_met(&self, prerequisite: &ExerciseKey, history: &[SessionEntry], workouts: u32) -> bool {
        let required = usize::try_from(workouts).unwrap_or(usize::MAX);
        if history.len() < required {
            return false;
        }
        let reports = self.repo.pain_history(prerequisite);
        history[history.len() - required..].iter().all(|session| {
            let day = session.date.date_naive();
            !reports
                .iter()
                .any(|report| report.had_pain && report.date.date_naive() == day)
        })
    }

    /// Evaluate and rank by the current phase's unlock priority
    pub fn evaluate_unlock_with_phase_priority(
        &self,
        target: &str,
        prerequisite: &ExerciseKey,
    ) -> PrioritizedUnlock {
        self.evaluate_unlock_with_phase_priority_at(target, prerequisite, Utc::now())
    }

    /// Evaluate and rank at a fixed time
    pub fn evaluate_unlock_with_phase_priority_at(
        &self,
        target: &str,
        prerequisite: &ExerciseKey,
        now: DateTime<Utc>,
    ) -> PrioritizedUnlock {
        let priority_policy = PhasePolicy::current(self.repo).unlock_priority();
        self.prioritize(self.evaluate_unlock_at(target, prerequisite, now), priority_policy)
    }

    fn prioritize(&self, evaluation: UnlockEvaluation, policy: UnlockPriority) -> PrioritizedUnlock {
        let exercise_type = self.classify(&evaluation.target);
        let priority = if evaluation.unlocked {
            priority_rank(policy, exercise_type)
        } else {
            EXCLUDED_PRIORITY
        };
        PrioritizedUnlock {
            evaluation,
            exercise_type,
            priority,
        }
    }

    /// Evaluate many `(target, prerequisite)` pairs, drop excluded ones, sort by rank then name
    pub fn rank_unlock_candidates(&self, candidates: &[(String, ExerciseKey)]) -> Vec<PrioritizedUnlock> {
        self.rank_unlock_candidates_at(candidates, Utc::now())
    }

    /// Rank candidates at a fixed time
    pub fn rank_unlock_candidates_at(
        &self,
        candidates: &[(String, ExerciseKey)],
        now: DateTime<Utc>,
    ) -> Vec<PrioritizedUnlock> {
        let policy = PhasePolicy::current(self.repo).unlock_priority();
        let mut ranked: Vec<PrioritizedUnlock> = candidates
            .iter()
            .map(|(target, prerequisite)| {
                self.prioritize(self.evaluate_unlock_at(target, prerequisite, now), policy)
            })
            .filter(|candidate| candidate.priority != EXCLUDED_PRIORITY)
            .collect();
        ranked.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.evaluation.target.cmp(&b.evaluation.target))
        });
        ranked
    }

    /// Persist a successful evaluation; returns whether a new record was written
    ///
    /// Simple-tier and already recorded targets need no record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the evaluation is not unlocked, or a storage error
    pub fn record_unlock(&self, evaluation: &UnlockEvaluation) -> AppResult<bool> {
        if !evaluation.unlocked {
            return Err(AppError::invalid_state(format!(
                "'{}' is still locked: missing {}",
                evaluation.target,
                evaluation.missing.join(", ")
            )));
        }
        if evaluation.tier == ComplexityTier::Simple
            || evaluation.already_recorded
            || self.repo.is_exercise_unlocked(&evaluation.target)
        {
            return Ok(false);
        }
        self.repo.save_unlock(&evaluation.target, evaluation.criteria)?;
        info!(exercise = %evaluation.target, tier = ?evaluation.tier, "Unlock recorded");
        Ok(true)
    }
}

/// Whole weeks since the first session in `history`; zero when empty
fn training_weeks(history: &[SessionEntry], now: DateTime<Utc>) -> i64 {
    history
        .first()
        .map_or(0, |first| (now - first.date).num_days().max(0) / DAYS_PER_WEEK)
}

/// Rank of an unlocked exercise under a priority policy
#[must_use]
pub const fn priority_rank(policy: UnlockPriority, exercise_type: ExerciseType) -> u32 {
    match (policy, exercise_type) {
        (UnlockPriority::All, _)
        | (
            UnlockPriority::BodyweightPriority,
            ExerciseType::Bodyweight | ExerciseType::Traditional,
        )
        | (UnlockPriority::SafetyFirst, ExerciseType::Bodyweight) => 1,
        (UnlockPriority::BodyweightPriority, _) => 2,
        (UnlockPriority::SafetyFirst, _) => EXCLUDED_PRIORITY,
    }
}
