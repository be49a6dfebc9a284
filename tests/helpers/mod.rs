// ABOUTME: Shared fixtures for liftwise integration tests
// ABOUTME: In-memory repositories, a fixed clock, and builders for sets and sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use liftwise::models::{DeloadState, ExerciseDefinition, ExerciseKey, SessionEntry, WorkoutSet};
use liftwise::{InMemoryStore, KvRepository, TrainingRepository};

pub type TestRepository = KvRepository<InMemoryStore>;

/// Monday 2025-03-03 12:00 UTC; every test measures from here
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 12, 0, 0).single().unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

pub fn repo() -> TestRepository {
    KvRepository::new(InMemoryStore::new())
}

pub fn set(weight: f64, reps: u32, rir: f64) -> WorkoutSet {
    WorkoutSet::new(weight, reps, rir)
}

/// `count` identical sets
pub fn sets(count: usize, weight: f64, reps: u32, rir: f64) -> Vec<WorkoutSet> {
    vec![set(weight, reps, rir); count]
}

pub fn session(date: DateTime<Utc>, sets: Vec<WorkoutSet>) -> SessionEntry {
    SessionEntry::new(date, sets)
}

pub fn bench_key() -> ExerciseKey {
    ExerciseKey::new("Upper A", "Dumbbell Bench Press")
}

pub fn goblet_key() -> ExerciseKey {
    ExerciseKey::new("Lower A", "Goblet Squat")
}

pub fn bench_definition() -> ExerciseDefinition {
    ExerciseDefinition::new("Dumbbell Bench Press", "8-12", Some("2-3")).with_increment(2.5)
}

/// One session per week ending today, oldest first
pub fn weekly_history(sessions: &[Vec<WorkoutSet>]) -> Vec<SessionEntry> {
    let count = i64::try_from(sessions.len()).unwrap();
    sessions
        .iter()
        .enumerate()
        .map(|(i, sets)| {
            let weeks_back = count - 1 - i64::try_from(i).unwrap();
            session(days_ago(weeks_back * 7), sets.clone())
        })
        .collect()
}

pub fn save_history(repo: &TestRepository, key: &ExerciseKey, history: &[SessionEntry]) {
    repo.save_exercise_history(key, history).unwrap();
}

pub fn last_deloaded(repo: &TestRepository, days: i64) {
    repo.save_deload_state(&DeloadState {
        last_deload_date: Some(days_ago(days)),
        ..DeloadState::default()
    })
    .unwrap();
}
