// ABOUTME: Decision-engine configuration for progression, regression, deload, unlock, and readiness
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! Intelligence Configuration Module
//!
//! Every numeric threshold the evaluators use is declared here, grouped per component,
//! so that the values can be audited and tested on their own.
//!
//! # Module Structure
//!
//! - `progression` - plateau window and load comparison tolerance
//! - `performance` - rep-drop, intra-set variance, and low-RIR thresholds
//! - `deload` - week thresholds per sensitivity, deload length, trigger limits
//! - `unlock` - complexity tiers, strength milestones, mobility criteria
//! - `readiness` - composite weights and tracked equipment transitions
//!
//! # Loading
//!
//! Defaults, then an optional JSON document named by `LIFTWISE_INTELLIGENCE_CONFIG`,
//! then individual `LIFTWISE_*` environment overrides. The result is validated.

pub mod deload;
pub mod error;
pub mod performance;
pub mod progression;
pub mod readiness;
pub mod unlock;

pub use deload::DeloadConfig;
pub use error::ConfigError;
pub use performance::PerformanceAnalyzerConfig;
pub use progression::ProgressionConfig;
pub use readiness::{ReadinessConfig, ReadinessWeights, TransitionTarget};
pub use unlock::{
    ComplexityTier, ExerciseTypeKeywords, StrengthMilestone, TierRequirements, UnlockConfig,
};

use liftwise_core::errors::AppError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static INTELLIGENCE_CONFIG: OnceLock<IntelligenceConfig> = OnceLock::new();

/// Environment variable naming an optional JSON configuration document
pub const CONFIG_FILE_ENV: &str = "LIFTWISE_INTELLIGENCE_CONFIG";

/// Main intelligence configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelligenceConfig {
    /// Progression evaluator settings
    pub progression: ProgressionConfig,
    /// Performance analyzer settings
    pub performance: PerformanceAnalyzerConfig,
    /// Deload controller settings
    pub deload: DeloadConfig,
    /// Unlock evaluator settings
    pub unlock: UnlockConfig,
    /// Readiness scorer settings
    pub readiness: ReadinessConfig,
}

impl IntelligenceConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        INTELLIGENCE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                let error = AppError::from(e);
                warn!(code = ?error.code, "Failed to load intelligence config: {}, using defaults", error);
                Self::default()
            })
        })
    }

    /// Load configuration from an optional file and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an environment variable holds an invalid value,
    /// or if validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_json_file(&path)?,
            Err(_) => Self::default(),
        };

        config = config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a JSON configuration document; omitted fields keep their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_json_file(path: &str) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("cannot read {path}: {e}")))?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(format!("{path}: {e}")))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progression.plateau_window < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "plateau_window must be at least 2",
            ));
        }
        if self.progression.weight_tolerance < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "weight_tolerance must be non-negative",
            ));
        }

        let performance = &self.performance;
        if performance.min_history_entries < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "min_history_entries must be at least 2",
            ));
        }
        for fraction in [
            performance.rep_drop_threshold,
            performance.intra_set_variance_threshold,
        ] {
            if fraction <= 0.0 || fraction > 1.0 {
                return Err(ConfigError::ValueOutOfRange(
                    "rep_drop_threshold and intra_set_variance_threshold must be in (0, 1]",
                ));
            }
        }

        let deload = &self.deload;
        if deload.very_high_threshold_weeks <= 0 {
            return Err(ConfigError::ValueOutOfRange(
                "deload week thresholds must be positive",
            ));
        }
        if deload.very_high_threshold_weeks >= deload.high_threshold_weeks
            || deload.high_threshold_weeks >= deload.normal_threshold_weeks
        {
            return Err(ConfigError::InvalidRange(
                "deload thresholds must descend: normal > high > very_high",
            ));
        }
        if deload.duration_days <= 0 {
            return Err(ConfigError::ValueOutOfRange(
                "deload duration_days must be positive",
            ));
        }
        if deload.fatigue_consecutive_sessions == 0 || deload.regression_count_threshold == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "deload trigger counts must be at least 1",
            ));
        }

        if self.unlock.strength_window_sessions == 0 || self.unlock.mobility_required_checks == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "unlock windows must be at least 1",
            ));
        }

        self.validate_readiness()
    }

    fn validate_readiness(&self) -> Result<(), ConfigError> {
        let readiness = &self.readiness;
        if (readiness.weights.total() - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights(
                "Readiness weights must sum to 1.0",
            ));
        }
        if (readiness.strength_load_points + readiness.strength_quality_points - 100.0).abs() > 0.01
        {
            return Err(ConfigError::InvalidWeights(
                "Strength load and quality points must sum to 100",
            ));
        }
        for target in &readiness.transitions {
            if target.id.trim().is_empty() || target.source_key.trim().is_empty() {
                return Err(ConfigError::MissingField("transition id and sourceKey"));
            }
            if target.target_weight <= 0.0
                || target.target_weeks == 0
                || target.mobility_required == 0
            {
                return Err(ConfigError::ValueOutOfRange(
                    "transition targets must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(
            "LIFTWISE_PLATEAU_WINDOW",
            &mut self.progression.plateau_window,
        )?;

        Self::apply_env_var(
            "LIFTWISE_REP_DROP_THRESHOLD",
            &mut self.performance.rep_drop_threshold,
        )?;
        Self::apply_env_var(
            "LIFTWISE_VARIANCE_THRESHOLD",
            &mut self.performance.intra_set_variance_threshold,
        )?;
        Self::apply_env_var(
            "LIFTWISE_LOW_RIR_CEILING",
            &mut self.performance.low_rir_ceiling,
        )?;

        Self::apply_env_var(
            "LIFTWISE_DELOAD_NORMAL_WEEKS",
            &mut self.deload.normal_threshold_weeks,
        )?;
        Self::apply_env_var(
            "LIFTWISE_DELOAD_HIGH_WEEKS",
            &mut self.deload.high_threshold_weeks,
        )?;
        Self::apply_env_var(
            "LIFTWISE_DELOAD_VERY_HIGH_WEEKS",
            &mut self.deload.very_high_threshold_weeks,
        )?;
        Self::apply_env_var(
            "LIFTWISE_DELOAD_DURATION_DAYS",
            &mut self.deload.duration_days,
        )?;
        Self::apply_env_var(
            "LIFTWISE_DELOAD_PERFORMANCE_TRIGGER",
            &mut self.deload.performance_trigger_enabled,
        )?;

        Self::apply_env_var(
            "LIFTWISE_READINESS_WEIGHT_STRENGTH",
            &mut self.readiness.weights.strength,
        )?;
        Self::apply_env_var(
            "LIFTWISE_READINESS_WEIGHT_WEEKS",
            &mut self.readiness.weights.weeks,
        )?;
        Self::apply_env_var(
            "LIFTWISE_READINESS_WEIGHT_MOBILITY",
            &mut self.readiness.weights.mobility,
        )?;
        Self::apply_env_var(
            "LIFTWISE_READINESS_WEIGHT_PAIN",
            &mut self.readiness.weights.pain_free,
        )?;

        Ok(self)
    }
}
