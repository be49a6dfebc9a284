// ABOUTME: Typed training repository over a raw key-value store
// ABOUTME: Validation boundary for writes and graceful typed defaults for reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use super::KeyValueStore;
use crate::constants::{limits, storage_keys};
use crate::errors::{AppError, AppResult};
use crate::models::{
    retain_most_recent, CriteriaSnapshot, DeloadState, ExerciseHistory, ExerciseKey,
    MobilityCheck, MobilityResponse, PainReport, PainSeverity, SessionEntry, TrainingPhase,
    UnlockRecord,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Typed read/write surface every evaluator depends on
///
/// Reads never fail: absent keys and malformed JSON come back as typed defaults.
/// Writes validate their arguments and return descriptive errors.
pub trait TrainingRepository {
    /// Oldest-first session history, empty if absent
    fn exercise_history(&self, key: &ExerciseKey) -> ExerciseHistory;

    /// Replace the history for `key`; callers cap it to the most recent entries first
    ///
    /// # Errors
    ///
    /// Returns an error if the history is too long, out of order, or holds invalid sets
    fn save_exercise_history(&self, key: &ExerciseKey, entries: &[SessionEntry]) -> AppResult<()>;

    /// Every exercise key with a stored history
    fn exercise_keys(&self) -> Vec<ExerciseKey>;

    /// Current deload lifecycle record (default inactive state if absent)
    fn deload_state(&self) -> DeloadState;

    /// Persist the deload lifecycle record
    ///
    /// # Errors
    ///
    /// Returns an error if the state breaks the active-state invariant
    fn save_deload_state(&self, state: &DeloadState) -> AppResult<()>;

    /// Mobility checks for a criteria key, oldest first
    fn mobility_checks(&self, criteria_key: &str) -> Vec<MobilityCheck>;

    /// Append a dated mobility check, keeping the most recent ten
    ///
    /// # Errors
    ///
    /// Returns an error for a blank criteria key or a failed write
    fn record_mobility_check(&self, criteria_key: &str, check: MobilityCheck) -> AppResult<()>;

    /// Append a mobility check dated now
    ///
    /// # Errors
    ///
    /// Returns an error for a blank criteria key or a failed write
    fn save_mobility_check(&self, criteria_key: &str, response: MobilityResponse) -> AppResult<()> {
        self.record_mobility_check(
            criteria_key,
            MobilityCheck {
                date: Utc::now(),
                response,
            },
        )
    }

    /// Pain reports for an exercise key, oldest first
    fn pain_history(&self, key: &ExerciseKey) -> Vec<PainReport>;

    /// Append a dated pain report, keeping the most recent ten
    ///
    /// # Errors
    ///
    /// Returns an error for a blank location or a failed write
    fn record_pain_report(&self, key: &ExerciseKey, report: PainReport) -> AppResult<()>;

    /// Append a pain report dated now
    ///
    /// # Errors
    ///
    /// Returns an error for a blank location or a failed write
    fn save_pain_report(
        &self,
        key: &ExerciseKey,
        had_pain: bool,
        location: Option<&str>,
        severity: Option<PainSeverity>,
    ) -> AppResult<()> {
        self.record_pain_report(
            key,
            PainReport {
                date: Utc::now(),
                had_pain,
                location: location.map(str::to_owned),
                severity,
            },
        )
    }

    /// Current training phase (building if absent or corrupt)
    fn training_phase(&self) -> TrainingPhase;

    /// Persist the training phase
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails
    fn save_training_phase(&self, phase: TrainingPhase) -> AppResult<()>;

    /// All granted unlocks keyed by exercise name
    fn unlocks(&self) -> BTreeMap<String, UnlockRecord>;

    /// Whether `name` has been unlocked, ignoring case and surrounding whitespace
    fn is_exercise_unlocked(&self, name: &str) -> bool {
        find_unlock(&self.unlocks(), name).is_some()
    }

    /// Grant a permanent unlock; re-saving an existing unlock keeps the original record
    ///
    /// # Errors
    ///
    /// Returns an error for a blank name or a failed write
    fn save_unlock(&self, name: &str, criteria: CriteriaSnapshot) -> AppResult<()>;

    /// Append one session to a history and cap it
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is invalid or the write fails
    fn append_session(&self, key: &ExerciseKey, entry: SessionEntry) -> AppResult<()> {
        let mut history = self.exercise_history(key);
        history.push(entry);
        retain_most_recent(&mut history, limits::MAX_HISTORY_ENTRIES);
        self.save_exercise_history(key, &history)
    }
}

fn find_unlock<'m>(unlocks: &'m BTreeMap<String, UnlockRecord>, name: &str) -> Option<&'m UnlockRecord> {
    let name = name.trim();
    unlocks
        .iter()
        .find(|(recorded, _)| recorded.eq_ignore_ascii_case(name))
        .map(|(_, record)| record)
}

/// [`TrainingRepository`] that serializes records as JSON into a [`KeyValueStore`]
#[derive(Debug)]
pub struct KvRepository<S> {
    store: S,
}

impl<S: KeyValueStore> KvRepository<S> {
    /// Wrap a raw store
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the raw store
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn history_key(key: &ExerciseKey) -> String {
        format!("{}{}", storage_keys::HISTORY_PREFIX, key.as_str())
    }

    fn mobility_key(criteria_key: &str) -> String {
        format!("{}{}", storage_keys::MOBILITY_PREFIX, criteria_key)
    }

    fn pain_key(key: &ExerciseKey) -> String {
        format!("{}{}", storage_keys::PAIN_PREFIX, key.as_str())
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.store.get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(key, error = %e, "Malformed record in store, using default");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                warn!(key, error = %e, "Store read failed, using default");
                T::default()
            }
        }
    }

    fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> AppResult<(String, String)> {
        Ok((key.to_owned(), serde_json::to_string(value)?))
    }

    fn validate_history(key: &ExerciseKey, entries: &[SessionEntry]) -> AppResult<()> {
        if entries.len() > limits::MAX_HISTORY_ENTRIES {
            return Err(AppError::value_out_of_range(format!(
                "history for '{key}' has {} entries; cap it to {} before saving",
                entries.len(),
                limits::MAX_HISTORY_ENTRIES
            ))
            .with_details(json!({
                "exerciseKey": key,
                "entries": entries.len(),
                "cap": limits::MAX_HISTORY_ENTRIES,
            })));
        }
        for entry in entries {
            entry.validate()?;
        }
        if entries.windows(2).any(|pair| pair[1].date < pair[0].date) {
            return Err(AppError::invalid_input(format!(
                "history for '{key}' must be ordered oldest first"
            )));
        }
        Ok(())
    }

    fn validate_pain_report(report: &PainReport) -> AppResult<()> {
        if report
            .location
            .as_deref()
            .is_some_and(|location| location.trim().is_empty())
        {
            return Err(AppError::invalid_input(
                "pain location must not be blank when provided",
            ));
        }
        Ok(())
    }

    fn appended_pain_history(
        &self,
        key: &ExerciseKey,
        report: PainReport,
    ) -> AppResult<Vec<PainReport>> {
        Self::validate_pain_report(&report)?;
        let mut reports = self.pain_history(key);
        reports.push(report);
        retain_most_recent(&mut reports, limits::MAX_PAIN_REPORTS);
        Ok(reports)
    }

    /// Record a finished session and its optional pain report as one batch
    ///
    /// # Errors
    ///
    /// Returns an error if either record is invalid or the batch write fails;
    /// nothing is written in that case
    pub fn log_session(
        &self,
        key: &ExerciseKey,
        entry: SessionEntry,
        pain: Option<PainReport>,
    ) -> AppResult<()> {
        let mut history = self.exercise_history(key);
        history.push(entry);
        retain_most_recent(&mut history, limits::MAX_HISTORY_ENTRIES);
        Self::validate_history(key, &history)?;

        let mut batch = vec![Self::encode(&Self::history_key(key), &history)?];
        if let Some(report) = pain {
            let reports = self.appended_pain_history(key, report)?;
            batch.push(Self::encode(&Self::pain_key(key), &reports)?);
        }

        self.store.set_many(batch)?;
        info!(exercise_key = %key, sessions = history.len(), "Session logged");
        Ok(())
    }
}

impl<S: KeyValueStore> TrainingRepository for KvRepository<S> {
    fn exercise_history(&self, key: &ExerciseKey) -> ExerciseHistory {
        self.read_or_default(&Self::history_key(key))
    }

    fn save_exercise_history(&self, key: &ExerciseKey, entries: &[SessionEntry]) -> AppResult<()> {
        Self::validate_history(key, entries)?;
        let (store_key, value) = Self::encode(&Self::history_key(key), entries)?;
        self.store.set(&store_key, value)?;
        debug!(exercise_key = %key, sessions = entries.len(), "History saved");
        Ok(())
    }

    fn exercise_keys(&self) -> Vec<ExerciseKey> {
        match self.store.keys() {
            Ok(keys) => keys
                .iter()
                .filter_map(|key| key.strip_prefix(storage_keys::HISTORY_PREFIX))
                .filter_map(|raw| ExerciseKey::parse(raw).ok())
                .collect(),
            Err(e) => {
                warn!(error = %e, "Store key listing failed, assuming no exercises");
                Vec::new()
            }
        }
    }

    fn deload_state(&self) -> DeloadState {
        let state: DeloadState = self.read_or_default(storage_keys::DELOAD_STATE);
        if let Err(e) = state.validate() {
            warn!(error = %e, "Stored deload state is inconsistent, treating as inactive");
            return DeloadState {
                last_deload_date: state.last_deload_date,
                dismissed_count: state.dismissed_count,
                ..DeloadState::default()
            };
        }
        state
    }

    fn save_deload_state(&self, state: &DeloadState) -> AppResult<()> {
        state.validate()?;
        let (key, value) = Self::encode(storage_keys::DELOAD_STATE, state)?;
        self.store.set(&key, value)
    }

    fn mobility_checks(&self, criteria_key: &str) -> Vec<MobilityCheck> {
        self.read_or_default(&Self::mobility_key(criteria_key))
    }

    fn record_mobility_check(&self, criteria_key: &str, check: MobilityCheck) -> AppResult<()> {
        if criteria_key.trim().is_empty() {
            return Err(AppError::missing_field("criteriaKey"));
        }
        let mut checks = self.mobility_checks(criteria_key);
        checks.push(check);
        retain_most_recent(&mut checks, limits::MAX_MOBILITY_CHECKS);
        let (key, value) = Self::encode(&Self::mobility_key(criteria_key), &checks)?;
        self.store.set(&key, value)
    }

    fn pain_history(&self, key: &ExerciseKey) -> Vec<PainReport> {
        self.read_or_default(&Self::pain_key(key))
    }

    fn record_pain_report(&self, key: &ExerciseKey, report: PainReport) -> AppResult<()> {
        let reports = self.appended_pain_history(key, report)?;
        let (store_key, value) = Self::encode(&Self::pain_key(key), &reports)?;
        self.store.set(&store_key, value)
    }

    fn training_phase(&self) -> TrainingPhase {
        let raw: String = self.read_or_default(storage_keys::TRAINING_PHASE);
        if raw.is_empty() {
            TrainingPhase::default()
        } else {
            TrainingPhase::parse_or_default(&raw)
        }
    }

    fn save_training_phase(&self, phase: TrainingPhase) -> AppResult<()> {
        let (key, value) = Self::encode(storage_keys::TRAINING_PHASE, &phase)?;
        self.store.set(&key, value)?;
        info!(phase = %phase, "Training phase changed");
        Ok(())
    }

    fn unlocks(&self) -> BTreeMap<String, UnlockRecord> {
        self.read_or_default(storage_keys::UNLOCKS)
    }

    fn save_unlock(&self, name: &str, criteria: CriteriaSnapshot) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("exerciseName"));
        }
        let mut unlocks = self.unlocks();
        if let Some(existing) = find_unlock(&unlocks, name) {
            debug!(exercise = name, recorded_as = %existing.exercise_name, "Unlock already recorded");
            return Ok(());
        }
        unlocks.insert(
            name.to_owned(),
            UnlockRecord {
                exercise_name: name.to_owned(),
                unlocked_date: Utc::now(),
                criteria,
            },
        );
        let (key, value) = Self::encode(storage_keys::UNLOCKS, &unlocks)?;
        self.store.set(&key, value)?;
        info!(exercise = name, "Exercise unlocked");
        Ok(())
    }
}
