// ABOUTME: Logged workout data - sets, session entries, exercise keys, and exercise definitions
// ABOUTME: Immutable value types with the shape checks applied at the store boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One logged set: load, repetitions, and reps in reserve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Load lifted (non-negative)
    pub weight: f64,
    /// Completed repetitions (or seconds for timed holds)
    pub reps: u32,
    /// Estimated reps short of failure
    pub rir: f64,
}

impl WorkoutSet {
    /// Create a set
    #[must_use]
    pub const fn new(weight: f64, reps: u32, rir: f64) -> Self {
        Self { weight, reps, rir }
    }

    /// A set counts as complete once load, reps, and RIR are all recorded
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.weight > 0.0 && self.reps > 0 && self.rir >= 0.0
    }

    /// Reject non-finite or negative values
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` if weight or RIR is negative, NaN, or infinite
    pub fn validate(&self) -> AppResult<()> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(AppError::value_out_of_range(format!(
                "set weight must be a finite number >= 0, got {}",
                self.weight
            )));
        }
        if !self.rir.is_finite() || self.rir < 0.0 {
            return Err(AppError::value_out_of_range(format!(
                "set rir must be a finite number >= 0, got {}",
                self.rir
            )));
        }
        Ok(())
    }
}

/// One performance of one exercise on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    /// Session date
    pub date: DateTime<Utc>,
    /// Sets in the order they were performed
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
    /// When the first set started
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// When the last set finished
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl SessionEntry {
    /// Create an entry without timing information
    #[must_use]
    pub fn new(date: DateTime<Utc>, sets: Vec<WorkoutSet>) -> Self {
        Self {
            date,
            sets,
            start_time: None,
            end_time: None,
        }
    }

    /// Attach start/end timestamps
    #[must_use]
    pub fn with_times(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Load of the first set, the reference weight for the session
    #[must_use]
    pub fn first_weight(&self) -> Option<f64> {
        self.sets.first().map(|set| set.weight)
    }

    /// Mean reps across all sets, `None` for an empty session
    #[must_use]
    pub fn average_reps(&self) -> Option<f64> {
        if self.sets.is_empty() {
            return None;
        }
        let total: f64 = self.sets.iter().map(|set| f64::from(set.reps)).sum();
        Some(total / self.sets.len() as f64)
    }

    /// Validate every set and the timing order
    ///
    /// # Errors
    ///
    /// Returns an error if a set is invalid or `end_time` precedes `start_time`
    pub fn validate(&self) -> AppResult<()> {
        for set in &self.sets {
            set.validate()?;
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if end < start {
                return Err(AppError::invalid_input(
                    "session endTime must not precede startTime",
                ));
            }
        }
        Ok(())
    }
}

/// Oldest-first session history for one exercise key
pub type ExerciseHistory = Vec<SessionEntry>;

/// Drop the oldest items so at most `cap` remain
pub fn retain_most_recent<T>(items: &mut Vec<T>, cap: usize) {
    if items.len() > cap {
        let excess = items.len() - cap;
        items.drain(..excess);
    }
}

/// Composite identity `"<workout> - <exercise name>"`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseKey(String);

impl ExerciseKey {
    const SEPARATOR: &'static str = " - ";

    /// Build a key from its workout and exercise parts
    #[must_use]
    pub fn new(workout: &str, exercise: &str) -> Self {
        Self(format!("{}{}{}", workout.trim(), Self::SEPARATOR, exercise.trim()))
    }

    /// Parse a raw stored key
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for a blank key
    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::missing_field("exerciseKey"));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Full key text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exercise part of the key (the whole key when it has no workout prefix)
    #[must_use]
    pub fn exercise_name(&self) -> &str {
        self.0
            .split_once(Self::SEPARATOR)
            .map_or(self.0.as_str(), |(_, exercise)| exercise)
    }
}

impl fmt::Display for ExerciseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static prescription for an exercise, as it comes from the workout catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDefinition {
    /// Display name
    pub name: String,
    /// `"min-max"`, a single value, or a duration such as `"30s"`
    pub rep_range: String,
    /// `"min-max"` or a single value; absent for timed holds
    #[serde(default)]
    pub rir_target: Option<String>,
    /// Load added when progression triggers
    #[serde(default)]
    pub weight_increment: f64,
}

impl ExerciseDefinition {
    /// Create a definition
    #[must_use]
    pub fn new(name: impl Into<String>, rep_range: impl Into<String>, rir_target: Option<&str>) -> Self {
        Self {
            name: name.into(),
            rep_range: rep_range.into(),
            rir_target: rir_target.map(str::to_owned),
            weight_increment: 0.0,
        }
    }

    /// Set the progression increment
    #[must_use]
    pub fn with_increment(mut self, increment: f64) -> Self {
        self.weight_increment = increment;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_key_round_trip_parts() {
        let key = ExerciseKey::new("Upper A", "Dumbbell Bench Press");
        assert_eq!(key.as_str(), "Upper A - Dumbbell Bench Press");
        assert_eq!(key.exercise_name(), "Dumbbell Bench Press");
        assert!(ExerciseKey::parse("   ").is_err());
    }

    #[test]
    fn test_retain_most_recent_drops_oldest() {
        let mut items: Vec<u32> = (1..=10).collect();
        retain_most_recent(&mut items, 8);
        assert_eq!(items, vec![3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_set_validation_rejects_negative_weight() {
        assert!(WorkoutSet::new(-1.0, 10, 2.0).validate().is_err());
        assert!(WorkoutSet::new(20.0, 10, f64::NAN).validate().is_err());
        assert!(WorkoutSet::new(0.0, 0, 0.0).validate().is_ok());
        assert!(!WorkoutSet::new(0.0, 10, 2.0).is_complete());
    }
}
