// ABOUTME: Argument parsers for the liftwise CLI
// ABOUTME: Turns compact set notation such as 20x12@2 into workout sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use liftwise::models::WorkoutSet;

/// Parse `WEIGHTxREPS@RIR` (the `@RIR` part may be omitted for timed holds, RIR 0)
///
/// # Errors
///
/// Returns a message naming the malformed part
pub fn parse_set(raw: &str) -> Result<WorkoutSet, String> {
    let raw = raw.trim();
    let (load, rir) = raw
        .split_once('@')
        .map_or((raw, None), |(load, rir)| (load, Some(rir)));
    let (weight, reps) = load
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WEIGHTxREPS@RIR, got '{raw}'"))?;

    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| format!("invalid weight '{weight}'"))?;
    let reps: u32 = reps
        .trim()
        .parse()
        .map_err(|_| format!("invalid reps '{reps}'"))?;
    let rir: f64 = rir.map_or(Ok(0.0), |value| {
        value
            .trim()
            .parse()
            .map_err(|_| format!("invalid RIR '{value}'"))
    })?;

    let set = WorkoutSet::new(weight, reps, rir);
    set.validate().map_err(|e| e.to_string())?;
    Ok(set)
}
