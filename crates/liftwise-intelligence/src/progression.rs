// ABOUTME: Double-progression evaluator deciding when load goes up and when a lift has plateaued
// ABOUTME: Malformed rep or RIR ranges are hard errors because they come from static exercise content
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! Progression Evaluator
//!
//! Load increases only after every set of a session reaches the top of the rep range at
//! or above the minimum RIR target. Time-based holds ("30s", "30-45s") and exercises with
//! no RIR target only need the rep (or second) ceiling. The status machine looks at the
//! most recent session only; regression is left to the performance analyzer.

use crate::config::intelligence::ProgressionConfig;
use crate::phase_policy::ProgressionBehavior;
use liftwise_core::errors::{AppError, AppResult};
use liftwise_core::models::{ExerciseDefinition, SessionEntry, WorkoutSet};
use serde::Serialize;
use tracing::debug;

/// Parsed rep range, e.g. "8-12", "10", or "30-45s"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepRange {
    /// Lower bound
    pub min: u32,
    /// Upper bound, the progression target
    pub max: u32,
    /// Range is a hold duration in seconds
    pub time_based: bool,
}

impl RepRange {
    /// Parse a rep range definition
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for empty, non-numeric, or inverted ranges
    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        let time_based = trimmed.ends_with(['s', 'S']);
        let (min, max) = parse_bounds(trimmed, "rep range", |part| {
            part.trim_end_matches(['s', 'S']).trim().parse::<u32>().ok()
        })?;
        Ok(Self {
            min,
            max,
            time_based,
        })
    }
}

/// Parsed RIR target, e.g. "2-3" or "2"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RirTarget {
    /// Minimum RIR every set must keep
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl RirTarget {
    /// Parse a RIR target definition
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for empty, negative, non-numeric, or inverted targets
    pub fn parse(raw: &str) -> AppResult<Self> {
        let (min, max) = parse_bounds(raw.trim(), "RIR target", |part| {
            part.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
        })?;
        Ok(Self { min, max })
    }
}

/// Rep range and optional RIR target of an exercise, parsed before any history is looked at
fn parse_definition(exercise: &ExerciseDefinition) -> AppResult<(RepRange, Option<RirTarget>)> {
    let range = RepRange::parse(&exercise.rep_range)?;
    let rir = exercise
        .rir_target
        .as_deref()
        .map(RirTarget::parse)
        .transpose()?;
    Ok((range, rir))
}

fn parse_bounds<T: PartialOrd + Copy>(
    raw: &str,
    what: &str,
    parse_part: impl Fn(&str) -> Option<T>,
) -> AppResult<(T, T)> {
    let invalid = || AppError::invalid_format(format!("invalid {what} '{raw}'"));
    if raw.is_empty() {
        return Err(invalid());
    }
    let (min, max) = match raw.split_once('-') {
        Some((low, high)) => (
            parse_part(low).ok_or_else(invalid)?,
            parse_part(high).ok_or_else(invalid)?,
        ),
        None => {
            let single = parse_part(raw).ok_or_else(invalid)?;
            (single, single)
        }
    };
    if min > max {
        return Err(invalid());
    }
    Ok((min, max))
}

/// Status of an exercise after its most recent session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressionStatus {
    /// Every set hit the targets; add load next time
    Ready,
    /// Same load for the whole plateau window without qualifying
    Plateau,
    /// Keep working within the range
    Normal,
}

/// Load recommendation for the next session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRecommendation {
    /// First-set load of the most recent session
    pub current_weight: f64,
    /// Load to use next session
    pub next_weight: f64,
    /// Status the recommendation is based on
    pub status: ProgressionStatus,
    /// Phase asks for tempo work instead of load changes
    pub tempo_focus: bool,
}

/// Double-progression evaluator
pub struct ProgressionEvaluator<'a> {
    config: &'a ProgressionConfig,
}

impl<'a> ProgressionEvaluator<'a> {
    /// Create an evaluator over the given thresholds
    #[must_use]
    pub const fn new(config: &'a ProgressionConfig) -> Self {
        Self { config }
    }

    /// Whether every set qualifies for a load increase
    ///
    /// An empty set list never qualifies.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the exercise's rep range or RIR target is malformed
    pub fn should_increase_weight(
        &self,
        sets: &[WorkoutSet],
        exercise: &ExerciseDefinition,
        behavior: ProgressionBehavior,
    ) -> AppResult<bool> {
        let (range, rir) = parse_definition(exercise)?;
        if !behavior.allow_weight_increase || sets.is_empty() {
            return Ok(false);
        }

        let reps_met = sets.iter().all(|set| set.reps >= range.max);
        let qualifies = match rir {
            Some(target) if !range.time_based => {
                reps_met && sets.iter().all(|set| set.rir >= target.min)
            }
            _ => reps_met,
        };
        Ok(qualifies)
    }

    /// Status after the most recent session
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the exercise definition is malformed
    pub fn progression_status(
        &self,
        history: &[SessionEntry],
        exercise: &ExerciseDefinition,
        behavior: ProgressionBehavior,
    ) -> AppResult<ProgressionStatus> {
        parse_definition(exercise)?;
        let Some(last) = history.last() else {
            return Ok(ProgressionStatus::Normal);
        };

        if self.should_increase_weight(&last.sets, exercise, behavior)? {
            return Ok(ProgressionStatus::Ready);
        }

        if self.is_plateau(history) {
            debug!(exercise = %exercise.name, "Plateau detected");
            return Ok(ProgressionStatus::Plateau);
        }

        Ok(ProgressionStatus::Normal)
    }

    fn is_plateau(&self, history: &[SessionEntry]) -> bool {
        let window = self.config.plateau_window;
        if history.len() < window {
            return false;
        }
        let weights: Vec<f64> = history[history.len() - window..]
            .iter()
            .filter_map(SessionEntry::first_weight)
            .collect();
        if weights.len() < window {
            return false;
        }
        let reference = weights[0];
        weights
            .iter()
            .all(|weight| (weight - reference).abs() <= self.config.weight_tolerance)
    }

    /// Load after applying one increment when progressing
    #[must_use]
    pub fn next_weight(current_weight: f64, increment: f64, should_progress: bool) -> f64 {
        if should_progress {
            current_weight + increment
        } else {
            current_weight
        }
    }

    /// Combined status and next-load recommendation; `None` without a logged load
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the exercise definition is malformed
    pub fn recommend_next_weight(
        &self,
        history: &[SessionEntry],
        exercise: &ExerciseDefinition,
        behavior: ProgressionBehavior,
    ) -> AppResult<Option<WeightRecommendation>> {
        let status = self.progression_status(history, exercise, behavior)?;
        let Some(current_weight) = history.last().and_then(SessionEntry::first_weight) else {
            return Ok(None);
        };

        Ok(Some(WeightRecommendation {
            current_weight,
            next_weight: Self::next_weight(
                current_weight,
                exercise.weight_increment,
                status == ProgressionStatus::Ready,
            ),
            status,
            tempo_focus: behavior.tempo_focus,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftwise_core::errors::ErrorCode;

    #[test]
    fn test_parse_rep_ranges() {
        assert_eq!(
            RepRange::parse("8-12").unwrap(),
            RepRange {
                min: 8,
                max: 12,
                time_based: false
            }
        );
        assert_eq!(RepRange::parse("10").unwrap().max, 10);

        let hold = RepRange::parse("30-45s").unwrap();
        assert!(hold.time_based);
        assert_eq!((hold.min, hold.max), (30, 45));
        assert!(RepRange::parse("30s").unwrap().time_based);
    }

    #[test]
    fn test_malformed_ranges_are_format_errors() {
        for raw in ["", "twelve", "12-8", "8-", "-3"] {
            let error = RepRange::parse(raw).unwrap_err();
            assert_eq!(error.code, ErrorCode::InvalidFormat, "{raw}");
        }
        assert!(RirTarget::parse("3-2").is_err());
        assert_eq!(RirTarget::parse("1.5").unwrap().min, 1.5);
    }

    #[test]
    fn test_next_weight() {
        assert_eq!(ProgressionEvaluator::next_weight(20.0, 2.5, true), 22.5);
        assert_eq!(ProgressionEvaluator::next_weight(20.0, 2.5, false), 20.0);
    }
}
