// ABOUTME: Core types and constants for the calorie advisor workspace
// ABOUTME: Foundation crate with error taxonomy, domain models, and input bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Calorie Core
//!
//! Foundation crate shared by the estimator, the recommenders, and the
//! advisor service. It changes infrequently, which keeps incremental
//! compilation of the other workspace members cheap.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: feature column names, input bounds, and defaults
//! - **models**: body, diet, training, and input models

/// Unified error taxonomy
pub mod errors;

/// Constants organized by domain
pub mod constants;

/// Domain models
pub mod models;
