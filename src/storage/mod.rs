// ABOUTME: Application-layer storage backends for the liftwise record store
// ABOUTME: Re-exports the file-backed store alongside the core store abstractions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

/// Whole-document JSON file backend
pub mod json_file;

pub use json_file::JsonFileStore;
pub use liftwise_core::storage::{InMemoryStore, KeyValueStore, KvRepository, TrainingRepository};
