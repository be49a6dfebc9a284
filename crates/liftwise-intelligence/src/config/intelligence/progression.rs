// ABOUTME: Progression evaluator configuration for double progression and plateau detection
// ABOUTME: Configures the plateau window and the tolerance used to compare session loads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use serde::{Deserialize, Serialize};

/// Progression Evaluator Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Most recent sessions that must share a load to call a plateau
    pub plateau_window: usize,
    /// Loads closer than this are considered identical
    pub weight_tolerance: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            plateau_window: 3,
            weight_tolerance: 1e-6,
        }
    }
}
