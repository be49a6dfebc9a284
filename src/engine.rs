// ABOUTME: Training engine facade bundling the repository, thresholds, and every evaluator
// ABOUTME: Produces per-session feedback and the dashboard summary shown between workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use chrono::{DateTime, Utc};
use liftwise_core::errors::AppResult;
use liftwise_core::models::{
    DeloadState, ExerciseDefinition, ExerciseKey, TrainingPhase, WorkoutSet,
};
use liftwise_core::storage::TrainingRepository;
use liftwise_intelligence::{
    DeloadController, DeloadTrigger, IntelligenceConfig, PerformanceAnalysis, PerformanceAnalyzer,
    PhasePolicy, ProgressionBehavior, ProgressionEvaluator, ProgressionStatus, ReadinessReport,
    ReadinessScorer, RegressionSignals, UnlockEvaluator, WeightRecommendation,
};
use serde::Serialize;
use tracing::debug;

/// Feedback for one exercise during or right after a session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFeedback {
    /// Exercise the feedback is for
    pub exercise_key: ExerciseKey,
    /// Phase the decision was made under
    pub phase: TrainingPhase,
    /// Load-change flags of that phase
    pub behavior: ProgressionBehavior,
    /// Status after the latest logged session
    pub status: ProgressionStatus,
    /// Next-session load; absent before the first logged load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<WeightRecommendation>,
    /// Regression and form checks
    pub performance: PerformanceAnalysis,
}

/// Summary of deload and readiness state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Current phase
    pub phase: TrainingPhase,
    /// Persisted deload record
    pub deload_state: DeloadState,
    /// Whether a deload should start
    pub deload: DeloadTrigger,
    /// Days left in the active deload
    pub days_remaining: i64,
    /// Active deload has passed its end date and is waiting to be ended
    pub deload_expired: bool,
    /// Readiness for every tracked transition
    pub readiness: Vec<ReadinessReport>,
}

/// Repository plus thresholds, handing out evaluators that borrow both
pub struct TrainingEngine<R> {
    repo: R,
    config: IntelligenceConfig,
}

impl<R: TrainingRepository> TrainingEngine<R> {
    /// Engine with explicit thresholds
    pub const fn new(repo: R, config: IntelligenceConfig) -> Self {
        Self { repo, config }
    }

    /// Engine with the process-wide thresholds
    pub fn with_global_config(repo: R) -> Self {
        Self::new(repo, IntelligenceConfig::global().clone())
    }

    /// Underlying repository
    pub const fn repository(&self) -> &R {
        &self.repo
    }

    /// Active thresholds
    pub const fn config(&self) -> &IntelligenceConfig {
        &self.config
    }

    /// Policy for the persisted phase
    pub fn phase_policy(&self) -> PhasePolicy {
        PhasePolicy::current(&self.repo)
    }

    /// Progression evaluator
    pub fn progression(&self) -> ProgressionEvaluator<'_> {
        ProgressionEvaluator::new(&self.config.progression)
    }

    /// Performance analyzer
    pub fn performance(&self) -> PerformanceAnalyzer<'_, R> {
        PerformanceAnalyzer::new(&self.repo, &self.config.performance)
    }

    /// Deload controller with the reserved never-trigger signals
    pub fn deload(&self) -> DeloadController<'_, R> {
        DeloadController::new(&self.repo, &self.config.deload)
    }

    /// Unlock evaluator
    pub fn unlocks(&self) -> UnlockEvaluator<'_, R> {
        UnlockEvaluator::new(&self.repo, &self.config.unlock)
    }

    /// Readiness scorer
    pub fn readiness(&self) -> ReadinessScorer<'_, R> {
        ReadinessScorer::new(&self.repo, &self.config.readiness)
    }

    /// Deload decision at `now`, counting regressions across every stored exercise
    /// when the performance trigger is enabled
    pub fn deload_decision_at(&self, now: DateTime<Utc>) -> DeloadTrigger {
        if self.config.deload.performance_trigger_enabled {
            let signals = RegressionSignals::new(self.performance(), self.repo.exercise_keys());
            self.deload()
                .with_signals(signals)
                .should_trigger_deload_at(now)
        } else {
            self.deload().should_trigger_deload_at(now)
        }
    }

    /// Progression status, next load, and performance analysis for one exercise
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the exercise definition's ranges are malformed
    pub fn session_feedback(
        &self,
        key: &ExerciseKey,
        exercise: &ExerciseDefinition,
        current_sets: Option<&[WorkoutSet]>,
    ) -> AppResult<SessionFeedback> {
        let policy = self.phase_policy();
        let behavior = policy.progression_behavior();
        let history = self.repo.exercise_history(key);
        let progression = self.progression();

        let status = progression.progression_status(&history, exercise, behavior)?;
        let recommendation = progression.recommend_next_weight(&history, exercise, behavior)?;
        let performance = self
            .performance()
            .analyze_exercise_performance(key, current_sets);

        debug!(exercise_key = %key, ?status, performance = ?performance.status, "Session feedback");
        Ok(SessionFeedback {
            exercise_key: key.clone(),
            phase: policy.phase,
            behavior,
            status,
            recommendation,
            performance,
        })
    }

    /// Dashboard summary now
    pub fn dashboard(&self) -> Dashboard {
        self.dashboard_at(Utc::now())
    }

    /// Dashboard summary at `now`
    pub fn dashboard_at(&self, now: DateTime<Utc>) -> Dashboard {
        let deload = self.deload();
        Dashboard {
            phase: self.repo.training_phase(),
            deload_state: deload.state(),
            deload: self.deload_decision_at(now),
            days_remaining: deload.days_remaining_at(now),
            deload_expired: deload.is_expired(now),
            readiness: self.readiness().score_all(),
        }
    }
}
