// ABOUTME: Core data models for logged training and the engine's persisted state
// ABOUTME: Re-exports sets, sessions, deload state, checks, phases, and unlock records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! # Data Models
//!
//! Typed records for everything the engine reads from or writes to the store.
//! All dates serialize as ISO-8601 strings and field names use camelCase so existing
//! JSON blobs stay readable.

mod checks;
mod deload;
mod phase;
mod unlock;
mod workout;

pub use checks::{MobilityCheck, MobilityResponse, PainReport, PainSeverity};
pub use deload::{DeloadState, DeloadType};
pub use phase::TrainingPhase;
pub use unlock::{CriteriaSnapshot, UnlockRecord};
pub use workout::{
    retain_most_recent, ExerciseDefinition, ExerciseHistory, ExerciseKey, SessionEntry, WorkoutSet,
};
