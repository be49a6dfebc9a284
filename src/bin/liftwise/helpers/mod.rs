// ABOUTME: Helper modules for the liftwise CLI
// ABOUTME: Output rendering and argument parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

pub mod display;
pub mod parse;
