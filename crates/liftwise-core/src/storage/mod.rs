// ABOUTME: Abstract synchronous key-value store and the typed training repository on top of it
// ABOUTME: Reads degrade to typed defaults; writes validate shape and fail fast
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! # Record Store
//!
//! The engine persists everything as JSON blobs in a flat key-value namespace.
//! [`KeyValueStore`] is the raw get/set surface; [`TrainingRepository`] is the typed
//! view every evaluator depends on. Swapping the backing store (in-memory for tests,
//! a JSON file for the CLI) never touches evaluator code.

mod memory;
mod repository;

pub use memory::InMemoryStore;
pub use repository::{KvRepository, TrainingRepository};

use crate::errors::AppResult;

/// Synchronous get/set surface over opaque string values
pub trait KeyValueStore {
    /// Read a raw value
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write one value
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or exceeds capacity
    fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.set_many(vec![(key.to_owned(), value)])
    }

    /// Write several values so that either all or none become visible
    ///
    /// # Errors
    ///
    /// Returns an error if the batch fails; no entry of the batch is applied in that case
    fn set_many(&self, entries: Vec<(String, String)>) -> AppResult<()>;

    /// Every key currently stored
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    fn keys(&self) -> AppResult<Vec<String>>;
}
