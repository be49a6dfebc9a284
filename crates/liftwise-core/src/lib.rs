// ABOUTME: Core types and record store for the liftwise strength-training engine
// ABOUTME: Foundation crate with error handling, data models, constants, and storage adapters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![deny(unsafe_code)]

//! # Liftwise Core
//!
//! Foundation crate shared by the decision engine and the application layer.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Sliding-window caps and storage key layout
//! - **models**: Sets, sessions, deload state, checks, phases, and unlock records
//! - **storage**: Abstract key-value store, in-memory backend, and the typed repository

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;

/// Key-value store abstraction and typed training repository
pub mod storage;
