// ABOUTME: Integration tests for regression and form-breakdown analysis
// ABOUTME: Covers the deload bypass, check ordering, set filtering, and fail-open reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use helpers::{bench_key, goblet_key, now, repo, save_history, set, sets, weekly_history};
use liftwise::models::DeloadType;
use liftwise::KeyValueStore;
use liftwise_intelligence::config::intelligence::{DeloadConfig, PerformanceAnalyzerConfig};
use liftwise_intelligence::{
    DeloadController, PerformanceAnalysis, PerformanceAnalyzer, PerformanceSignal,
    PerformanceStatus,
};

#[test]
fn test_active_deload_always_reports_good() {
    let repo = repo();
    let deload_config = DeloadConfig::default();
    DeloadController::new(&repo, &deload_config)
        .start_deload_at(DeloadType::Standard, now())
        .unwrap();
    save_history(
        &repo,
        &bench_key(),
        &weekly_history(&[sets(3, 25.0, 12, 2.0), sets(3, 15.0, 4, 0.0)]),
    );

    let config = PerformanceAnalyzerConfig::default();
    let analysis = PerformanceAnalyzer::new(&repo, &config)
        .analyze_exercise_performance(&bench_key(), Some(&[set(15.0, 12, 0.0), set(15.0, 2, 0.0)]));
    assert_eq!(analysis.status, PerformanceStatus::Good);
    assert!(analysis.signal.is_none());
}

#[test]
fn test_load_drop_is_an_alert() {
    let repo = repo();
    save_history(
        &repo,
        &bench_key(),
        &weekly_history(&[sets(3, 22.5, 10, 2.0), sets(3, 20.0, 10, 2.0)]),
    );

    let config = PerformanceAnalyzerConfig::default();
    let analysis = PerformanceAnalyzer::new(&repo, &config).analyze_exercise_performance(&bench_key(), None);
    assert_eq!(analysis.status, PerformanceStatus::Alert);
    assert_eq!(analysis.signal, Some(PerformanceSignal::WeightRegression));
    assert!(analysis.message.is_some());
}

#[test]
fn test_quarter_rep_drop_is_an_alert() {
    let repo = repo();
    save_history(
        &repo,
        &bench_key(),
        &weekly_history(&[sets(3, 20.0, 12, 2.0), sets(3, 20.0, 9, 2.0)]),
    );

    let config = PerformanceAnalyzerConfig::default();
    let analysis = PerformanceAnalyzer::new(&repo, &config).analyze_exercise_performance(&bench_key(), None);
    assert_eq!(analysis.signal, Some(PerformanceSignal::RepDrop));
}

#[test]
fn test_small_rep_drop_is_fine() {
    let repo = repo();
    save_history(
        &repo,
        &bench_key(),
        &weekly_history(&[sets(3, 20.0, 12, 2.0), sets(3, 20.0, 10, 2.0)]),
    );

    let config = PerformanceAnalyzerConfig::default();
    let analysis = PerformanceAnalyzer::new(&repo, &config).analyze_exercise_performance(&bench_key(), None);
    assert_eq!(analysis.status, PerformanceStatus::Good);
}

#[test]
fn test_history_checks_run_before_set_checks() {
    let repo = repo();
    save_history(
        &repo,
        &bench_key(),
        &weekly_history(&[sets(3, 22.5, 10, 2.0), sets(3, 20.0, 10, 0.0)]),
    );

    let config = PerformanceAnalyzerConfig::default();
    let analysis = PerformanceAnalyzer::new(&repo, &config)
        .analyze_exercise_performance(&bench_key(), Some(&[set(20.0, 12, 0.0), set(20.0, 4, 0.0)]));
    assert_eq!(analysis.signal, Some(PerformanceSignal::WeightRegression));
}

#[test]
fn test_wide_rep_spread_in_current_session_warns() {
    let repo = repo();
    let config = PerformanceAnalyzerConfig::default();
    let analysis = PerformanceAnalyzer::new(&repo, &config)
        .analyze_exercise_performance(&bench_key(), Some(&[set(20.0, 12, 2.0), set(20.0, 5, 2.0)]));
    assert_eq!(analysis.status, PerformanceStatus::Warning);
    assert_eq!(analysis.signal, Some(PerformanceSignal::IntraSetVariance));
}

#[test]
fn test_every_set_near_failure_warns() {
    let repo = repo();
    save_history(&repo, &bench_key(), &weekly_history(&[sets(3, 20.0, 10, 1.0)]));

    let config = PerformanceAnalyzerConfig::default();
    let analysis = PerformanceAnalyzer::new(&repo, &config).analyze_exercise_performance(&bench_key(), None);
    assert_eq!(analysis.status, PerformanceStatus::Warning);
    assert_eq!(analysis.signal, Some(PerformanceSignal::LowRir));
}

#[test]
fn test_unstarted_sets_are_ignored() {
    let repo = repo();
    let config = PerformanceAnalyzerConfig::default();
    let analysis = PerformanceAnalyzer::new(&repo, &config)
        .analyze_exercise_performance(&bench_key(), Some(&[set(20.0, 12, 2.0), set(20.0, 0, 0.0)]));
    assert_eq!(analysis.status, PerformanceStatus::Good);
}

#[test]
fn test_no_data_is_good() {
    let repo = repo();
    let config = PerformanceAnalyzerConfig::default();
    let analysis = PerformanceAnalyzer::new(&repo, &config).analyze_exercise_performance(&bench_key(), None);
    assert_eq!(analysis, PerformanceAnalysis::good());
}

#[test]
fn test_corrupt_history_fails_open() {
    let repo = repo();
    let raw = r#"[{"date":"2025-02-24T12:00:00Z","sets":[{"weight":-5.0,"reps":10,"rir":2.0}]},
                  {"date":"2025-03-03T12:00:00Z","sets":[{"weight":-9.0,"reps":2,"rir":0.0}]}]"#;
    repo.store()
        .set("history:Upper A - Dumbbell Bench Press", raw.to_owned())
        .unwrap();

    let config = PerformanceAnalyzerConfig::default();
    let analysis = PerformanceAnalyzer::new(&repo, &config).analyze_exercise_performance(&bench_key(), None);
    assert_eq!(analysis.status, PerformanceStatus::Good);
}

#[test]
fn test_count_regressing_exercises() {
    let repo = repo();
    save_history(
        &repo,
        &bench_key(),
        &weekly_history(&[sets(3, 22.5, 10, 2.0), sets(3, 20.0, 10, 2.0)]),
    );
    save_history(
        &repo,
        &goblet_key(),
        &weekly_history(&[sets(3, 24.0, 12, 2.0), sets(3, 24.0, 12, 2.0)]),
    );

    let config = PerformanceAnalyzerConfig::default();
    let analyzer = PerformanceAnalyzer::new(&repo, &config);
    assert_eq!(analyzer.count_regressing_exercises(&[bench_key(), goblet_key()]), 1);
}
