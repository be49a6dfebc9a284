// ABOUTME: Session commands for the liftwise CLI
// ABOUTME: Logs finished sessions with pain reports and reports per-exercise progression status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use liftwise::models::{
    ExerciseDefinition, ExerciseKey, PainReport, PainSeverity, SessionEntry, WorkoutSet,
};
use liftwise::TrainingRepository;
use serde_json::json;
use tracing::info;

use super::Engine;
use crate::helpers::display::print_json;

/// Pain flags given alongside a logged session
pub struct PainInput {
    /// Where it hurt; implies a painful report
    pub location: Option<String>,
    pub severity: Option<PainSeverity>,
    /// Explicit pain-free report when no location is given
    pub pain_free: bool,
}

impl PainInput {
    fn into_report(self) -> Option<PainReport> {
        let date = Utc::now();
        match self.location {
            Some(location) => Some(PainReport {
                date,
                had_pain: true,
                location: Some(location),
                severity: self.severity,
            }),
            None if self.pain_free => Some(PainReport {
                date,
                had_pain: false,
                location: None,
                severity: None,
            }),
            None => None,
        }
    }
}

/// Session finished at `finished`; a duration back-fills the start time
fn session_entry(
    sets: Vec<WorkoutSet>,
    duration_minutes: Option<u32>,
    finished: DateTime<Utc>,
) -> SessionEntry {
    let mut entry = SessionEntry::new(finished, sets);
    if let Some(minutes) = duration_minutes {
        entry = entry.with_times(finished - Duration::minutes(i64::from(minutes)), finished);
    }
    entry
}

/// Append a session and its optional pain report in one write
pub fn log(
    engine: &Engine,
    workout: &str,
    exercise: &str,
    sets: Vec<WorkoutSet>,
    duration_minutes: Option<u32>,
    pain: PainInput,
) -> Result<()> {
    let key = ExerciseKey::new(workout, exercise);
    let set_count = sets.len();
    let complete_sets = sets.iter().filter(|set| set.is_complete()).count();
    let entry = session_entry(sets, duration_minutes, Utc::now());
    engine
        .repository()
        .log_session(&key, entry, pain.into_report())?;

    info!(exercise_key = %key, sets = set_count, complete_sets, "Session recorded");
    let history = engine.repository().exercise_history(&key);
    print_json(&json!({
        "exerciseKey": key,
        "sessionsStored": history.len(),
        "completeSets": complete_sets,
        "latest": history.last(),
    }))
}

/// Progression status, next load, and performance checks
pub fn status(
    engine: &Engine,
    workout: &str,
    exercise: &str,
    rep_range: &str,
    rir_target: Option<&str>,
    increment: f64,
) -> Result<()> {
    let key = ExerciseKey::new(workout, exercise);
    let definition = ExerciseDefinition::new(exercise, rep_range, rir_target).with_increment(increment);
    let feedback = engine.session_feedback(&key, &definition, None)?;
    print_json(&feedback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_duration_sets_start_and_end_times() {
        let finished = Utc.with_ymd_and_hms(2025, 3, 3, 18, 45, 0).unwrap();
        let entry = session_entry(vec![WorkoutSet::new(20.0, 12, 2.0)], Some(45), finished);

        assert_eq!(entry.date, finished);
        assert_eq!(entry.end_time, Some(finished));
        assert_eq!(
            entry.start_time,
            Some(Utc.with_ymd_and_hms(2025, 3, 3, 18, 0, 0).unwrap())
        );
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_no_duration_leaves_times_unset() {
        let finished = Utc.with_ymd_and_hms(2025, 3, 3, 18, 45, 0).unwrap();
        let entry = session_entry(Vec::new(), None, finished);
        assert!(entry.start_time.is_none());
        assert!(entry.end_time.is_none());
    }
}
