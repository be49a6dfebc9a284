// ABOUTME: Integration tests for the JSON file store and the typed repository on top of it
// ABOUTME: Covers persistence across reopen, corrupt files, atomic batches, caps, and quota failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use std::fs;

use helpers::{bench_key, days_ago, now, session, sets};
use liftwise::models::{DeloadType, PainReport, PainSeverity, SessionEntry, TrainingPhase};
use liftwise::{
    ErrorCode, InMemoryStore, JsonFileStore, KeyValueStore, KvRepository, TrainingRepository,
};
use liftwise_intelligence::config::intelligence::DeloadConfig;
use liftwise_intelligence::DeloadController;
use tempfile::TempDir;

fn open_repo(dir: &TempDir) -> KvRepository<JsonFileStore> {
    KvRepository::new(JsonFileStore::open(dir.path().join("data").join("store.json")).unwrap())
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let repo = open_repo(&dir);
        repo.log_session(
            &bench_key(),
            session(now(), sets(3, 20.0, 12, 2.0)),
            Some(PainReport {
                date: now(),
                had_pain: true,
                location: Some("elbow".to_owned()),
                severity: Some(PainSeverity::Mild),
            }),
        )
        .unwrap();
        repo.save_training_phase(TrainingPhase::Maintenance).unwrap();
        let config = DeloadConfig::default();
        DeloadController::new(&repo, &config)
            .start_deload_at(DeloadType::Light, now())
            .unwrap();
    }

    let repo = open_repo(&dir);
    assert_eq!(repo.exercise_history(&bench_key()).len(), 1);
    assert_eq!(repo.pain_history(&bench_key())[0].severity, Some(PainSeverity::Mild));
    assert_eq!(repo.training_phase(), TrainingPhase::Maintenance);
    assert!(repo.deload_state().active);
    assert_eq!(repo.exercise_keys(), vec![bench_key()]);
}

#[test]
fn test_missing_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path().join("absent.json")).unwrap();
    assert!(store.keys().unwrap().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn test_corrupt_file_is_kept_aside_and_store_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::open(&path).unwrap();
    assert!(store.keys().unwrap().is_empty());
    assert!(!path.exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("store.json.corrupt")).unwrap(),
        "{ not json"
    );

    store.set("training_phase", "recovery".to_owned()).unwrap();
    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("training_phase").unwrap().as_deref(),
        Some("recovery")
    );
    assert!(!dir.path().join("store.json.tmp").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("store.json.corrupt")).unwrap(),
        "{ not json"
    );
}

#[test]
fn test_history_is_capped_at_eight_sessions() {
    let dir = TempDir::new().unwrap();
    let repo = open_repo(&dir);
    for week in (0..10).rev() {
        repo.append_session(&bench_key(), session(days_ago(week * 7), sets(3, 20.0, 10, 2.0)))
            .unwrap();
    }

    let history = repo.exercise_history(&bench_key());
    assert_eq!(history.len(), 8);
    assert_eq!(history.last().unwrap().date, now());
    assert_eq!(history[0].date, days_ago(49));
}

#[test]
fn test_invalid_session_is_not_written() {
    let dir = TempDir::new().unwrap();
    let repo = open_repo(&dir);
    let bad = SessionEntry::new(now(), vec![helpers::set(-2.5, 10, 2.0)]);

    let error = repo.log_session(&bench_key(), bad, None).unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    assert!(repo.exercise_history(&bench_key()).is_empty());
}

#[test]
fn test_blank_pain_location_rejects_whole_batch() {
    let repo = KvRepository::new(InMemoryStore::new());
    let result = repo.log_session(
        &bench_key(),
        session(now(), sets(3, 20.0, 10, 2.0)),
        Some(PainReport {
            date: now(),
            had_pain: true,
            location: Some("  ".to_owned()),
            severity: None,
        }),
    );

    assert_eq!(result.unwrap_err().code, ErrorCode::InvalidInput);
    assert!(repo.exercise_history(&bench_key()).is_empty());
    assert!(repo.pain_history(&bench_key()).is_empty());
}

#[test]
fn test_quota_failure_leaves_previous_state() {
    let repo = KvRepository::new(InMemoryStore::with_capacity_bytes(400));
    repo.log_session(&bench_key(), session(days_ago(7), sets(1, 20.0, 10, 2.0)), None)
        .unwrap();

    let error = repo
        .log_session(&bench_key(), session(now(), sets(12, 20.0, 10, 2.0)), None)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::QuotaExceeded);
    assert_eq!(repo.exercise_history(&bench_key()).len(), 1);
}

#[test]
fn test_out_of_order_history_is_rejected() {
    let repo = KvRepository::new(InMemoryStore::new());
    let error = repo
        .save_exercise_history(
            &bench_key(),
            &[session(now(), sets(1, 20.0, 10, 2.0)), session(days_ago(7), sets(1, 20.0, 10, 2.0))],
        )
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}
