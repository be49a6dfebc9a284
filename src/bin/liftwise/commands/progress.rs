// ABOUTME: Progress commands for the liftwise CLI
// ABOUTME: Mobility self-checks, exercise unlocks, transition readiness, and the dashboard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use anyhow::Result;
use liftwise::models::{ExerciseKey, MobilityResponse};
use liftwise::TrainingRepository;
use serde_json::json;
use tracing::warn;

use super::Engine;
use crate::helpers::display::print_json;

/// Record a mobility self-check dated now
pub fn mobility(engine: &Engine, criteria_key: &str, response: MobilityResponse) -> Result<()> {
    engine
        .repository()
        .save_mobility_check(criteria_key, response)?;
    print_json(&json!({
        "criteriaKey": criteria_key,
        "recent": engine.repository().mobility_checks(criteria_key),
    }))
}

/// Evaluate an unlock under the current phase and optionally persist it
pub fn unlock(
    engine: &Engine,
    target: &str,
    from_workout: &str,
    from_exercise: &str,
    record: bool,
) -> Result<()> {
    let prerequisite = ExerciseKey::new(from_workout, from_exercise);
    let prioritized = engine
        .unlocks()
        .evaluate_unlock_with_phase_priority(target, &prerequisite);

    let recorded = if record && prioritized.evaluation.unlocked {
        engine.unlocks().record_unlock(&prioritized.evaluation)?
    } else {
        if record {
            warn!(exercise = target, "Not recording a locked exercise");
        }
        false
    };

    print_json(&json!({
        "evaluation": prioritized,
        "recorded": recorded,
    }))
}

/// Readiness for one transition or all of them
pub fn readiness(engine: &Engine, id: Option<&str>) -> Result<()> {
    let scorer = engine.readiness();
    match id {
        Some(id) => print_json(&scorer.score_by_id(id)?),
        None => print_json(&scorer.score_all()),
    }
}

/// Deload decision, lifecycle, and readiness in one summary
pub fn dashboard(engine: &Engine) -> Result<()> {
    print_json(&engine.dashboard())
}
