// ABOUTME: Progression and periodization decision engine for strength training
// ABOUTME: Rule-based evaluators over capped session history, checks, and phase policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![deny(unsafe_code)]

//! # Liftwise Intelligence
//!
//! Five read-mostly evaluators plus the phase policy they share. Each evaluator is a
//! pure function of its inputs and one [`TrainingRepository`] dependency, so tests run
//! against the in-memory store without mocking.
//!
//! - [`phase_policy`]: phase-dependent progression behavior, deload sensitivity, unlock priority
//! - [`progression`]: double progression and plateau detection
//! - [`performance_analyzer`]: conservative regression and form-breakdown detection
//! - [`deload`]: deload lifecycle and trigger strategies
//! - [`unlock`]: criteria-gated exercise unlocking with phase-aware ranking
//! - [`readiness`]: weighted readiness percentage for equipment transitions
//!
//! [`TrainingRepository`]: liftwise_core::storage::TrainingRepository

/// Engine thresholds with environment overrides and validation
pub mod config;

/// Deload lifecycle state machine and trigger strategies
pub mod deload;

/// Regression and form-breakdown detection
pub mod performance_analyzer;

/// Phase-dependent policy lookups
pub mod phase_policy;

/// Double-progression rules and plateau detection
pub mod progression;

/// Equipment transition readiness scoring
pub mod readiness;

/// Exercise unlock evaluation and ranking
pub mod unlock;

pub use config::IntelligenceConfig;
pub use deload::{
    weeks_since_last_deload, DeloadController, DeloadReason, DeloadSignals, DeloadTrigger,
    RegressionSignals, ReservedSignals,
};
pub use performance_analyzer::{
    PerformanceAnalysis, PerformanceAnalyzer, PerformanceSignal, PerformanceStatus,
};
pub use phase_policy::{DeloadSensitivity, PhasePolicy, ProgressionBehavior, UnlockPriority};
pub use progression::{ProgressionEvaluator, ProgressionStatus, WeightRecommendation};
pub use readiness::{CriterionProgress, ReadinessReport, ReadinessScorer};
pub use unlock::{ExerciseType, PrioritizedUnlock, UnlockEvaluation, UnlockEvaluator};
