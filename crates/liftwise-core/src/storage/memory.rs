// ABOUTME: In-memory key-value store used by tests and as an ephemeral backend
// ABOUTME: Optional byte capacity reproduces storage quota failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use super::KeyValueStore;
use crate::errors::{AppError, AppResult};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// `RwLock<BTreeMap>`-backed store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
    capacity_bytes: Option<usize>,
}

impl InMemoryStore {
    /// Unbounded store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once keys plus values exceed `capacity_bytes`
    #[must_use]
    pub fn with_capacity_bytes(capacity_bytes: usize) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            capacity_bytes: Some(capacity_bytes),
        }
    }

    fn used_bytes(entries: &BTreeMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AppError::storage("in-memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, batch: Vec<(String, String)>) -> AppResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AppError::storage("in-memory store lock poisoned"))?;

        // Stage on a copy so a capacity failure leaves the store untouched
        let mut staged = entries.clone();
        for (key, value) in batch {
            staged.insert(key, value);
        }
        if let Some(capacity) = self.capacity_bytes {
            let used = Self::used_bytes(&staged);
            if used > capacity {
                return Err(AppError::quota_exceeded(format!(
                    "write needs {used} bytes but store capacity is {capacity}"
                )));
            }
        }
        *entries = staged;
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AppError::storage("in-memory store lock poisoned"))?;
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_capacity_failure_leaves_batch_unapplied() {
        let store = InMemoryStore::with_capacity_bytes(16);
        store.set("a", "1234".into()).unwrap();

        let error = store
            .set_many(vec![
                ("b".into(), "5678".into()),
                ("c".into(), "x".repeat(32)),
            ])
            .unwrap_err();

        assert_eq!(error.code, ErrorCode::QuotaExceeded);
        assert_eq!(store.get("b").unwrap(), None);
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1234"));
    }
}
