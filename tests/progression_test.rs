// ABOUTME: Integration tests for double progression, plateau detection, and next-load recommendations
// ABOUTME: Covers phase gating, timed holds, and the plateau window edge cases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use helpers::{bench_definition, set, sets, weekly_history};
use liftwise::models::{ExerciseDefinition, TrainingPhase};
use liftwise::ErrorCode;
use liftwise_intelligence::config::intelligence::ProgressionConfig;
use liftwise_intelligence::{
    PhasePolicy, ProgressionBehavior, ProgressionEvaluator, ProgressionStatus,
};

fn building() -> ProgressionBehavior {
    PhasePolicy::for_phase(TrainingPhase::Building).progression_behavior()
}

#[test]
fn test_top_of_range_at_target_rir_progresses() {
    let config = ProgressionConfig::default();
    let evaluator = ProgressionEvaluator::new(&config);
    let logged = [set(20.0, 12, 3.0), set(20.0, 12, 2.0), set(20.0, 12, 2.0)];

    assert!(evaluator
        .should_increase_weight(&logged, &bench_definition(), building())
        .unwrap());
}

#[test]
fn test_any_single_set_short_blocks_progression() {
    let config = ProgressionConfig::default();
    let evaluator = ProgressionEvaluator::new(&config);
    let definition = bench_definition();

    for index in 0..3 {
        let mut logged = sets(3, 20.0, 12, 2.0);
        logged[index].reps = 11;
        assert!(
            !evaluator
                .should_increase_weight(&logged, &definition, building())
                .unwrap(),
            "set {index} below the top of the range"
        );

        let mut logged = sets(3, 20.0, 12, 2.0);
        logged[index].rir = 1.0;
        assert!(
            !evaluator
                .should_increase_weight(&logged, &definition, building())
                .unwrap(),
            "set {index} below the RIR target"
        );
    }
}

#[test]
fn test_empty_session_never_progresses() {
    let config = ProgressionConfig::default();
    let evaluator = ProgressionEvaluator::new(&config);
    assert!(!evaluator
        .should_increase_weight(&[], &bench_definition(), building())
        .unwrap());
}

#[test]
fn test_non_building_phases_hold_load() {
    let config = ProgressionConfig::default();
    let evaluator = ProgressionEvaluator::new(&config);
    let logged = sets(3, 20.0, 12, 3.0);

    for phase in [TrainingPhase::Maintenance, TrainingPhase::Recovery] {
        let behavior = PhasePolicy::for_phase(phase).progression_behavior();
        assert!(!evaluator
            .should_increase_weight(&logged, &bench_definition(), behavior)
            .unwrap());
    }
}

#[test]
fn test_timed_holds_ignore_rir() {
    let config = ProgressionConfig::default();
    let evaluator = ProgressionEvaluator::new(&config);
    let plank = ExerciseDefinition::new("Plank", "30-45s", Some("2-3"));

    assert!(evaluator
        .should_increase_weight(&sets(3, 0.0, 45, 0.0), &plank, building())
        .unwrap());
    assert!(!evaluator
        .should_increase_weight(&sets(3, 0.0, 40, 0.0), &plank, building())
        .unwrap());
}

#[test]
fn test_missing_rir_target_checks_reps_only() {
    let config = ProgressionConfig::default();
    let evaluator = ProgressionEvaluator::new(&config);
    let curl = ExerciseDefinition::new("Hammer Curl", "10-15", None);

    assert!(evaluator
        .should_increase_weight(&sets(2, 10.0, 15, 0.0), &curl, building())
        .unwrap());
}

#[test]
fn test_malformed_rep_range_is_rejected() {
    let config = ProgressionConfig::default();
    let evaluator = ProgressionEvaluator::new(&config);
    let broken = ExerciseDefinition::new("Dumbbell Bench Press", "eight-twelve", Some("2-3"));

    let error = evaluator
        .should_increase_weight(&sets(3, 20.0, 12, 2.0), &broken, building())
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidFormat);
}

#[test]
fn test_malformed_definition_fails_before_history_is_read() {
    let config = ProgressionConfig::default();
    let evaluator = ProgressionEvaluator::new(&config);
    let inverted = ExerciseDefinition::new("Dumbbell Bench Press", "12-8", Some("2-3"));
    let bad_rir = ExerciseDefinition::new("Dumbbell Bench Press", "8-12", Some("three"));
    let maintenance = PhasePolicy::for_phase(TrainingPhase::Maintenance).progression_behavior();

    for broken in [&inverted, &bad_rir] {
        let status = evaluator.progression_status(&[], broken, building());
        assert_eq!(status.unwrap_err().code, ErrorCode::InvalidFormat);

        let recommendation = evaluator.recommend_next_weight(&[], broken, building());
        assert_eq!(recommendation.unwrap_err().code, ErrorCode::InvalidFormat);

        let gated = evaluator.should_increase_weight(&[], broken, maintenance);
        assert_eq!(gated.unwrap_err().code, ErrorCode::InvalidFormat);
    }
}

#[test]
fn test_three_sessions_at_same_load_plateau() {
    let config = ProgressionConfig::default();
    let evaluator = ProgressionEvaluator::new(&config);
    let history = weekly_history(&[
        sets(3, 20.0, 10, 2.0),
        sets(3, 20.0, 11, 2.0),
        sets(3, 20.0, 10, 2.0),
    ]);

    let status = evaluator
        .progression_status(&history, &bench_definition(), building())
        .unwrap();
    assert_eq!(status, ProgressionStatus::Plateau);
}

#[test]
fn test_plateau_needs_full_window_of_loaded_sessions() {
    let config = ProgressionConfig::default();
    let evaluator = ProgressionEvaluator::new(&config);
    let definition = bench_definition();

    let short = weekly_history(&[sets(3, 20.0, 10, 2.0), sets(3, 20.0, 10, 2.0)]);
    assert_eq!(
        evaluator
            .progression_status(&short, &definition, building())
            .unwrap(),
        ProgressionStatus::Normal
    );

    let with_empty = weekly_history(&[sets(3, 20.0, 10, 2.0), Vec::new(), sets(3, 20.0, 10, 2.0)]);
    assert_eq!(
        evaluator
            .progression_status(&with_empty, &definition, building())
            .unwrap(),
        ProgressionStatus::Normal
    );

    let moving = weekly_history(&[
        sets(3, 20.0, 10, 2.0),
        sets(3, 20.0, 10, 2.0),
        sets(3, 22.5, 8, 2.0),
    ]);
    assert_eq!(
        evaluator
            .progression_status(&moving, &definition, building())
            .unwrap(),
        ProgressionStatus::Normal
    );
}

#[test]
fn test_ready_wins_over_plateau() {
    let config = ProgressionConfig::default();
    let evaluator = ProgressionEvaluator::new(&config);
    let history = weekly_history(&[
        sets(3, 20.0, 10, 2.0),
        sets(3, 20.0, 11, 2.0),
        sets(3, 20.0, 12, 2.0),
    ]);

    let recommendation = evaluator
        .recommend_next_weight(&history, &bench_definition(), building())
        .unwrap()
        .unwrap();
    assert_eq!(recommendation.status, ProgressionStatus::Ready);
    assert!((recommendation.current_weight - 20.0).abs() < f64::EPSILON);
    assert!((recommendation.next_weight - 22.5).abs() < f64::EPSILON);
    assert!(!recommendation.tempo_focus);
}

#[test]
fn test_maintenance_recommends_tempo_at_same_load() {
    let config = ProgressionConfig::default();
    let evaluator = ProgressionEvaluator::new(&config);
    let history = weekly_history(&[sets(3, 20.0, 12, 3.0)]);
    let behavior = PhasePolicy::for_phase(TrainingPhase::Maintenance).progression_behavior();

    let recommendation = evaluator
        .recommend_next_weight(&history, &bench_definition(), behavior)
        .unwrap()
        .unwrap();
    assert_eq!(recommendation.status, ProgressionStatus::Normal);
    assert!((recommendation.next_weight - 20.0).abs() < f64::EPSILON);
    assert!(recommendation.tempo_focus);
}

#[test]
fn test_no_recommendation_without_history() {
    let config = ProgressionConfig::default();
    let evaluator = ProgressionEvaluator::new(&config);
    assert!(evaluator
        .recommend_next_weight(&[], &bench_definition(), building())
        .unwrap()
        .is_none());
}
