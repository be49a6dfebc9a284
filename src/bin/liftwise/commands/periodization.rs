// ABOUTME: Periodization commands for the liftwise CLI
// ABOUTME: Drives the deload lifecycle and reads or changes the training phase
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use anyhow::Result;
use chrono::Utc;
use liftwise::models::{DeloadType, TrainingPhase};
use liftwise::TrainingRepository;
use serde_json::json;
use tracing::debug;

use super::Engine;
use crate::helpers::display::print_json;

/// Whether a deload should start now
pub fn deload_check(engine: &Engine) -> Result<()> {
    print_json(&engine.deload_decision_at(Utc::now()))
}

/// Start a deload of the given type
pub fn deload_start(engine: &Engine, deload_type: DeloadType) -> Result<()> {
    let state = engine.deload().start_deload(deload_type)?;
    print_json(&json!({
        "state": state,
        "volumeMultiplier": deload_type.volume_multiplier(),
        "intensityMultiplier": deload_type.intensity_multiplier(),
    }))
}

/// End the active deload
pub fn deload_end(engine: &Engine) -> Result<()> {
    print_json(&engine.deload().end_deload()?)
}

/// Dismiss the current recommendation
pub fn deload_postpone(engine: &Engine) -> Result<()> {
    print_json(&engine.deload().postpone_deload()?)
}

/// Persisted deload record and days remaining
pub fn deload_show(engine: &Engine) -> Result<()> {
    let now = Utc::now();
    let deload = engine.deload();
    print_json(&json!({
        "state": deload.state(),
        "daysRemaining": deload.days_remaining_at(now),
        "expired": deload.is_expired(now),
    }))
}

/// Current phase and the policy it implies
pub fn phase_show(engine: &Engine) -> Result<()> {
    let policy = engine.phase_policy();
    print_json(&json!({
        "phase": policy.phase,
        "progression": policy.progression_behavior(),
        "deloadSensitivity": policy.deload_sensitivity(),
        "deloadThresholdWeeks": policy.deload_sensitivity().threshold_weeks(&engine.config().deload),
        "unlockPriority": policy.unlock_priority(),
    }))
}

/// Persist a new phase
pub fn phase_set(engine: &Engine, phase: TrainingPhase) -> Result<()> {
    let previous = engine.repository().training_phase();
    engine.repository().save_training_phase(phase)?;
    debug!(from = %previous, to = %phase, "Phase updated from the command line");
    phase_show(engine)
}
