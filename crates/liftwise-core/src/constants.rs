// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Sliding-window caps, storage keys, and time units for the liftwise engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! Constants module
//!
//! Store-level limits live here because the repository enforces them on write.
//! Decision thresholds live in `liftwise-intelligence`'s configuration instead.

/// Sliding-window limits enforced by the record store
pub mod limits {
    /// Most recent session entries kept per exercise key
    pub const MAX_HISTORY_ENTRIES: usize = 8;
    /// Most recent mobility checks kept per criteria key
    pub const MAX_MOBILITY_CHECKS: usize = 10;
    /// Most recent pain reports kept per exercise key
    pub const MAX_PAIN_REPORTS: usize = 10;
}

/// Key layout inside the key-value store
pub mod storage_keys {
    /// Prefix for per-exercise session history
    pub const HISTORY_PREFIX: &str = "history:";
    /// Prefix for per-criteria mobility check logs
    pub const MOBILITY_PREFIX: &str = "mobility:";
    /// Prefix for per-exercise pain reports
    pub const PAIN_PREFIX: &str = "pain:";
    /// Single deload state record
    pub const DELOAD_STATE: &str = "deload_state";
    /// Single training phase scalar
    pub const TRAINING_PHASE: &str = "training_phase";
    /// Map of exercise name to unlock record
    pub const UNLOCKS: &str = "unlocks";
}

/// Calendar arithmetic
pub mod time {
    /// Days in a training week
    pub const DAYS_PER_WEEK: i64 = 7;
    /// Milliseconds in a day
    pub const MILLIS_PER_DAY: i64 = 86_400_000;
}

/// Service identifiers used in structured logs
pub mod service_names {
    /// Application name
    pub const LIFTWISE: &str = "liftwise";
}
