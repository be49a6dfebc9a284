// ABOUTME: Key-value store persisted as a single JSON document on disk
// ABOUTME: Every write replaces the file atomically via a temporary file and rename
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use liftwise_core::errors::{AppError, AppResult};
use liftwise_core::storage::KeyValueStore;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, warn};

const TEMP_SUFFIX: &str = ".tmp";
const CORRUPT_SUFFIX: &str = ".corrupt";

/// `path` with `suffix` appended to its file name
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Store that keeps the whole namespace in memory and mirrors it to one JSON file
///
/// The file is loaded once at open. A batch becomes visible on disk all at once
/// because the new document is written to a sibling temporary file and renamed
/// over the old one.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file starts empty and a corrupt one is
    /// moved aside to `<name>.corrupt` before starting empty
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file exists but cannot be read, or if a corrupt
    /// file cannot be moved aside
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let entries: BTreeMap<String, String> = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    let backup = sibling_path(&path, CORRUPT_SUFFIX);
                    fs::rename(&path, &backup).map_err(|rename_error| {
                        AppError::storage(format!("cannot move corrupt {} aside", path.display()))
                            .with_source(rename_error)
                    })?;
                    warn!(
                        path = %path.display(),
                        backup = %backup.display(),
                        error = %e,
                        "Store file is corrupt, moved aside and starting empty"
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AppError::storage(format!("cannot read {}", path.display()))
                    .with_source(e))
            }
        };
        debug!(path = %path.display(), keys = entries.len(), "Store opened");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::storage(format!("cannot create {}", parent.display())).with_source(e)
            })?;
        }

        let document = serde_json::to_vec_pretty(entries)?;
        let temp = sibling_path(&self.path, TEMP_SUFFIX);
        let write = || -> io::Result<()> {
            let mut file = fs::File::create(&temp)?;
            file.write_all(&document)?;
            file.sync_all()?;
            fs::rename(&temp, &self.path)
        };
        write().map_err(|e| {
            let _ = fs::remove_file(&temp);
            AppError::storage(format!("cannot write {}", self.path.display())).with_source(e)
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AppError::storage("file store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, batch: Vec<(String, String)>) -> AppResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AppError::storage("file store lock poisoned"))?;

        let mut staged = entries.clone();
        let written = batch.len();
        for (key, value) in batch {
            staged.insert(key, value);
        }
        self.persist(&staged)?;
        *entries = staged;
        debug!(path = %self.path.display(), written, "Store persisted");
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AppError::storage("file store lock poisoned"))?;
        Ok(entries.keys().cloned().collect())
    }
}
