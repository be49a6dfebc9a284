// ABOUTME: Environment configuration for the liftwise application layer
// ABOUTME: Resolves the data file location and logging settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! Environment-based application configuration
//!
//! Engine thresholds live in [`liftwise_intelligence::IntelligenceConfig`]; this module only
//! covers where data is kept and how the process logs.

use crate::logging::LoggingConfig;
use anyhow::{anyhow, Result};
use liftwise_core::constants::service_names;
use std::env;
use std::path::PathBuf;

/// Environment variable overriding the data file path
pub const DATA_FILE_ENV: &str = "LIFTWISE_DATA_FILE";

/// File name used inside the platform data directory
pub const DEFAULT_DATA_FILE_NAME: &str = "store.json";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON document backing the record store
    pub data_file: PathBuf,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if no data file is configured and the platform has no data directory
    pub fn from_env() -> Result<Self> {
        let data_file = match env::var(DATA_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_data_file()?,
        };

        Ok(Self {
            data_file,
            logging: LoggingConfig::from_env(),
        })
    }

    /// Replace the data file, e.g. from a command-line flag
    #[must_use]
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        self
    }
}

/// `<platform data dir>/liftwise/store.json`
///
/// # Errors
///
/// Returns an error if the platform has no data directory
pub fn default_data_file() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(service_names::LIFTWISE).join(DEFAULT_DATA_FILE_NAME))
        .ok_or_else(|| anyhow!("no platform data directory; set {DATA_FILE_ENV}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_data_file_env_override() {
        env::set_var(DATA_FILE_ENV, "/tmp/liftwise-test/store.json");
        let config = AppConfig::from_env();
        env::remove_var(DATA_FILE_ENV);

        assert_eq!(
            config.unwrap().data_file,
            PathBuf::from("/tmp/liftwise-test/store.json")
        );
    }

    #[test]
    #[serial]
    fn test_flag_wins_over_environment() {
        env::set_var(DATA_FILE_ENV, "/tmp/from-env.json");
        let config = AppConfig::from_env()
            .unwrap()
            .with_data_file(Some(PathBuf::from("/tmp/from-flag.json")));
        env::remove_var(DATA_FILE_ENV);

        assert_eq!(config.data_file, PathBuf::from("/tmp/from-flag.json"));
    }
}
