// ABOUTME: Command implementations for the liftwise CLI
// ABOUTME: Groups session logging, periodization, and progress commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use liftwise::{JsonFileStore, KvRepository, TrainingEngine};

pub mod periodization;
pub mod progress;
pub mod session;

/// Engine over the file-backed repository every command runs against
pub type Engine = TrainingEngine<KvRepository<JsonFileStore>>;
