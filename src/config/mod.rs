// ABOUTME: Configuration module entry point for the calorie advisor
// ABOUTME: Re-exports the environment-driven configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration management
//!
//! All settings come from environment variables with documented defaults;
//! see [`environment::AppConfig::from_env`].

/// Environment-based configuration
pub mod environment;

pub use environment::{AppConfig, DatasetConfig, ModelCacheConfig};
