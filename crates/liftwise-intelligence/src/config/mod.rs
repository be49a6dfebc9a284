// ABOUTME: Configuration module for liftwise-intelligence crate
// ABOUTME: Re-exports intelligence configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

/// Decision-engine thresholds (progression, performance, deload, unlock, readiness)
pub mod intelligence;

pub use intelligence::IntelligenceConfig;
