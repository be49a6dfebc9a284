// ABOUTME: Main library entry point for the liftwise strength-training tracker
// ABOUTME: Wires the decision engine to a file-backed store, logging, and environment config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![deny(unsafe_code)]

//! # Liftwise
//!
//! A local, single-user strength-training tracker. The interesting part is the
//! progression and periodization decision engine in `liftwise-intelligence`; this crate
//! wires it to a JSON file store and exposes it through the `liftwise` CLI.
//!
//! ## Architecture
//!
//! - **`liftwise-core`**: errors, data model, key-value store abstraction, typed repository
//! - **`liftwise-intelligence`**: thresholds and the five evaluators plus phase policy
//! - **this crate**: [`TrainingEngine`] facade, [`JsonFileStore`], logging, [`AppConfig`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use liftwise::{JsonFileStore, KvRepository, TrainingEngine};
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = JsonFileStore::open("store.json")?;
//! let engine = TrainingEngine::with_global_config(KvRepository::new(store));
//! let dashboard = engine.dashboard();
//! println!("{}", serde_json::to_string_pretty(&dashboard)?);
//! # Ok(())
//! # }
//! ```

/// Environment-based application configuration
pub mod config;

/// Engine facade over the repository and evaluators
pub mod engine;

/// Structured logging setup
pub mod logging;

/// Store backends
pub mod storage;

pub use config::AppConfig;
pub use engine::{Dashboard, SessionFeedback, TrainingEngine};
pub use liftwise_core::errors::{AppError, AppResult, ErrorCode};
pub use liftwise_core::models;
pub use liftwise_intelligence::IntelligenceConfig;
pub use storage::{InMemoryStore, JsonFileStore, KeyValueStore, KvRepository, TrainingRepository};
