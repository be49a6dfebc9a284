// ABOUTME: Integration tests for deload triggers and the deload lifecycle
// ABOUTME: Covers phase-dependent time thresholds, opt-in signals, and start/end/postpone transitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use chrono::Duration;
use helpers::{
    bench_key, days_ago, goblet_key, last_deloaded, now, repo, save_history, sets, weekly_history,
};
use liftwise::models::{DeloadType, TrainingPhase};
use liftwise::{ErrorCode, IntelligenceConfig, TrainingEngine, TrainingRepository};
use liftwise_intelligence::config::intelligence::DeloadConfig;
use liftwise_intelligence::{
    weeks_since_last_deload, DeloadController, DeloadReason, DeloadSignals, DeloadTrigger,
};
use serde_json::json;

struct FixedSignals {
    regressions: u32,
    fatigue: Vec<f64>,
}

impl DeloadSignals for FixedSignals {
    fn regressing_exercise_count(&self) -> u32 {
        self.regressions
    }

    fn recent_fatigue_scores(&self) -> Vec<f64> {
        self.fatigue.clone()
    }
}

#[test]
fn test_building_triggers_after_six_weeks() {
    let repo = repo();
    last_deloaded(&repo, 42);

    let config = DeloadConfig::default();
    let decision = DeloadController::new(&repo, &config).should_trigger_deload_at(now());
    assert_eq!(
        serde_json::to_value(decision).unwrap(),
        json!({"trigger": true, "reason": "time", "weeks": 6})
    );
}

#[test]
fn test_maintenance_waits_four_weeks() {
    let repo = repo();
    repo.save_training_phase(TrainingPhase::Maintenance).unwrap();
    last_deloaded(&repo, 21);

    let config = DeloadConfig::default();
    let controller = DeloadController::new(&repo, &config);
    let decision = controller.should_trigger_deload_at(now());
    assert_eq!(decision, DeloadTrigger::none());
    assert_eq!(serde_json::to_value(decision).unwrap(), json!({"trigger": false}));

    let later = controller.should_trigger_deload_at(now() + Duration::days(7));
    assert_eq!(later.reason, Some(DeloadReason::Time { weeks: 4 }));
}

#[test]
fn test_recovery_triggers_after_two_weeks() {
    let repo = repo();
    repo.save_training_phase(TrainingPhase::Recovery).unwrap();
    last_deloaded(&repo, 15);

    let config = DeloadConfig::default();
    let decision = DeloadController::new(&repo, &config).should_trigger_deload_at(now());
    assert_eq!(decision.reason, Some(DeloadReason::Time { weeks: 2 }));
}

#[test]
fn test_never_deloaded_never_triggers_on_time() {
    let repo = repo();
    let config = DeloadConfig::default();
    let controller = DeloadController::new(&repo, &config);

    for weeks in [0, 6, 52, 520] {
        let decision = controller.should_trigger_deload_at(now() + Duration::weeks(weeks));
        assert!(!decision.trigger, "{weeks} weeks out");
    }
    assert_eq!(weeks_since_last_deload(&controller.state(), now()), 0);
}

#[test]
fn test_time_trigger_stays_on_once_reached() {
    let repo = repo();
    last_deloaded(&repo, 0);
    let config = DeloadConfig::default();
    let controller = DeloadController::new(&repo, &config);

    let mut fired = false;
    for day in 0..120 {
        let decision = controller.should_trigger_deload_at(now() + Duration::days(day));
        assert!(!fired || decision.trigger, "trigger dropped on day {day}");
        fired = decision.trigger;
        assert_eq!(fired, day >= 42, "day {day}");
    }
}

#[test]
fn test_active_deload_suppresses_triggers() {
    let repo = repo();
    last_deloaded(&repo, 90);
    let config = DeloadConfig::default();
    let controller = DeloadController::new(&repo, &config);
    controller.start_deload_at(DeloadType::Light, now()).unwrap();

    assert_eq!(controller.should_trigger_deload_at(now()), DeloadTrigger::none());
}

#[test]
fn test_days_remaining_rounds_partial_days_up() {
    let repo = repo();
    let config = DeloadConfig::default();
    let controller = DeloadController::new(&repo, &config);
    let started = controller.start_deload_at(DeloadType::Light, now()).unwrap();
    let end = started.end_date.unwrap();

    assert_eq!(controller.days_remaining_at(end - Duration::milliseconds(500)), 1);
    assert_eq!(controller.days_remaining_at(end - Duration::days(1)), 1);
    assert_eq!(
        controller.days_remaining_at(end - Duration::days(1) - Duration::milliseconds(1)),
        2
    );
    assert_eq!(controller.days_remaining_at(end), 0);
}

#[test]
fn test_deload_lifecycle() {
    let repo = repo();
    let config = DeloadConfig::default();
    let controller = DeloadController::new(&repo, &config);
    let start = days_ago(7);

    let started = controller.start_deload_at(DeloadType::Standard, start).unwrap();
    assert!(started.active);
    assert_eq!(started.deload_type, Some(DeloadType::Standard));
    assert_eq!(started.end_date, Some(start + Duration::days(7)));

    assert_eq!(controller.days_remaining_at(start), 7);
    assert_eq!(controller.days_remaining_at(start + Duration::hours(73)), 4);
    assert!(!controller.is_expired(start + Duration::days(6)));
    assert!(controller.is_expired(now()));
    assert_eq!(controller.days_remaining_at(now() + Duration::days(3)), 0);

    let ended = controller.end_deload().unwrap();
    assert!(!ended.active);
    assert_eq!(ended.last_deload_date, Some(start));
    assert_eq!(controller.days_remaining_at(now()), 0);

    let decision = controller.should_trigger_deload_at(start + Duration::weeks(6));
    assert_eq!(decision.reason, Some(DeloadReason::Time { weeks: 6 }));
}

#[test]
fn test_starting_twice_is_rejected() {
    let repo = repo();
    let config = DeloadConfig::default();
    let controller = DeloadController::new(&repo, &config);
    controller.start_deload_at(DeloadType::Standard, now()).unwrap();

    let error = controller
        .start_deload_at(DeloadType::ActiveRecovery, now())
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidState);
    assert_eq!(controller.state().deload_type, Some(DeloadType::Standard));
}

#[test]
fn test_ending_without_active_deload_changes_nothing() {
    let repo = repo();
    last_deloaded(&repo, 10);
    let config = DeloadConfig::default();
    let controller = DeloadController::new(&repo, &config);

    let before = controller.state();
    assert_eq!(controller.end_deload().unwrap(), before);
    assert_eq!(controller.state(), before);
}

#[test]
fn test_postpone_counts_dismissals() {
    let repo = repo();
    last_deloaded(&repo, 50);
    let config = DeloadConfig::default();
    let controller = DeloadController::new(&repo, &config);

    controller.postpone_deload().unwrap();
    let state = controller.postpone_deload().unwrap();
    assert_eq!(state.dismissed_count, 2);
    assert_eq!(state.last_deload_date, Some(days_ago(50)));
    assert!(controller.should_trigger_deload_at(now()).trigger);
}

#[test]
fn test_regression_signal_only_counts_when_enabled() {
    let repo = repo();
    last_deloaded(&repo, 7);
    let signals = || FixedSignals {
        regressions: 3,
        fatigue: Vec::new(),
    };

    let disabled = DeloadConfig::default();
    let decision = DeloadController::new(&repo, &disabled)
        .with_signals(signals())
        .should_trigger_deload_at(now());
    assert!(!decision.trigger);

    let enabled = DeloadConfig {
        performance_trigger_enabled: true,
        ..DeloadConfig::default()
    };
    let decision = DeloadController::new(&repo, &enabled)
        .with_signals(signals())
        .should_trigger_deload_at(now());
    assert_eq!(
        serde_json::to_value(decision).unwrap(),
        json!({"trigger": true, "reason": "performance", "regressions": 3})
    );
}

#[test]
fn test_sustained_fatigue_triggers() {
    let repo = repo();
    let config = DeloadConfig::default();

    let tired = FixedSignals {
        regressions: 0,
        fatigue: vec![5.0, 8.5, 9.0],
    };
    let decision = DeloadController::new(&repo, &config)
        .with_signals(tired)
        .should_trigger_deload_at(now());
    assert_eq!(decision.reason, Some(DeloadReason::Fatigue { score: 9.0 }));

    let one_bad_day = FixedSignals {
        regressions: 0,
        fatigue: vec![9.0, 6.0],
    };
    let decision = DeloadController::new(&repo, &config)
        .with_signals(one_bad_day)
        .should_trigger_deload_at(now());
    assert!(!decision.trigger);
}

fn regressing_repo() -> helpers::TestRepository {
    let repo = repo();
    last_deloaded(&repo, 7);
    let regressing = weekly_history(&[sets(3, 22.5, 10, 2.0), sets(3, 20.0, 10, 2.0)]);
    save_history(&repo, &bench_key(), &regressing);
    save_history(&repo, &goblet_key(), &regressing);
    repo
}

#[test]
fn test_engine_counts_stored_regressions_when_enabled() {
    let engine = TrainingEngine::new(regressing_repo(), IntelligenceConfig::default());
    assert!(!engine.deload_decision_at(now()).trigger);

    let mut config = IntelligenceConfig::default();
    config.deload.performance_trigger_enabled = true;
    let engine = TrainingEngine::new(regressing_repo(), config);
    assert_eq!(
        engine.deload_decision_at(now()).reason,
        Some(DeloadReason::Performance { regressions: 2 })
    );
}
