// ABOUTME: Integration tests for the training engine facade
// ABOUTME: Covers per-session feedback under each phase and the dashboard summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use chrono::Duration;
use helpers::{
    bench_definition, bench_key, last_deloaded, now, repo, save_history, set, sets, weekly_history,
};
use liftwise::models::{DeloadType, ExerciseDefinition, TrainingPhase};
use liftwise::{ErrorCode, IntelligenceConfig, TrainingEngine, TrainingRepository};
use liftwise_intelligence::{DeloadReason, PerformanceSignal, PerformanceStatus, ProgressionStatus};
use serde_json::json;

#[test]
fn test_feedback_after_a_qualifying_session() {
    let repo = repo();
    save_history(
        &repo,
        &bench_key(),
        &weekly_history(&[sets(3, 20.0, 10, 2.0), sets(3, 20.0, 12, 2.0)]),
    );
    let engine = TrainingEngine::new(repo, IntelligenceConfig::default());

    let feedback = engine
        .session_feedback(&bench_key(), &bench_definition(), None)
        .unwrap();
    assert_eq!(feedback.phase, TrainingPhase::Building);
    assert_eq!(feedback.status, ProgressionStatus::Ready);
    let recommendation = feedback.recommendation.unwrap();
    assert!((recommendation.next_weight - 22.5).abs() < f64::EPSILON);
    assert_eq!(feedback.performance.status, PerformanceStatus::Good);
}

#[test]
fn test_feedback_in_maintenance_holds_load() {
    let repo = repo();
    repo.save_training_phase(TrainingPhase::Maintenance).unwrap();
    save_history(&repo, &bench_key(), &weekly_history(&[sets(3, 20.0, 12, 3.0)]));
    let engine = TrainingEngine::new(repo, IntelligenceConfig::default());

    let feedback = engine
        .session_feedback(&bench_key(), &bench_definition(), None)
        .unwrap();
    assert!(feedback.behavior.tempo_focus);
    assert_eq!(feedback.status, ProgressionStatus::Normal);

    let value = serde_json::to_value(&feedback).unwrap();
    assert_eq!(value["phase"], json!("maintenance"));
    assert_eq!(value["recommendation"]["nextWeight"], json!(20.0));
}

#[test]
fn test_feedback_reports_form_breakdown_in_current_sets() {
    let engine = TrainingEngine::new(repo(), IntelligenceConfig::default());
    let current = [set(20.0, 12, 2.0), set(20.0, 10, 2.0), set(20.0, 5, 2.0)];

    let feedback = engine
        .session_feedback(&bench_key(), &bench_definition(), Some(&current))
        .unwrap();
    assert!(feedback.recommendation.is_none());
    assert_eq!(
        feedback.performance.signal,
        Some(PerformanceSignal::IntraSetVariance)
    );
}

#[test]
fn test_malformed_definition_is_an_error() {
    let engine = TrainingEngine::new(repo(), IntelligenceConfig::default());
    let broken = ExerciseDefinition::new("Dumbbell Bench Press", "12-8", None);

    let error = engine
        .session_feedback(&bench_key(), &broken, None)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidFormat);
}

#[test]
fn test_dashboard_recommends_overdue_deload() {
    let repo = repo();
    last_deloaded(&repo, 45);
    let engine = TrainingEngine::new(repo, IntelligenceConfig::default());

    let dashboard = engine.dashboard_at(now());
    assert!(!dashboard.deload_state.active);
    assert_eq!(dashboard.deload.reason, Some(DeloadReason::Time { weeks: 6 }));
    assert_eq!(dashboard.days_remaining, 0);
    assert!(!dashboard.deload_expired);
    assert_eq!(
        dashboard.readiness.len(),
        engine.config().readiness.transitions.len()
    );
}

#[test]
fn test_dashboard_during_deload() {
    let engine = TrainingEngine::new(repo(), IntelligenceConfig::default());
    engine
        .deload()
        .start_deload_at(DeloadType::ActiveRecovery, now())
        .unwrap();

    let dashboard = engine.dashboard_at(now() + Duration::days(2));
    assert!(dashboard.deload_state.active);
    assert!(!dashboard.deload.trigger);
    assert_eq!(dashboard.days_remaining, 5);

    let expired = engine.dashboard_at(now() + Duration::days(8));
    assert!(expired.deload_expired);
    assert_eq!(expired.days_remaining, 0);
}
