// ABOUTME: Unified error taxonomy for dataset, validation, alignment, and lookup failures
// ABOUTME: Defines ErrorCode, AppError, and the AppResult alias shared across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Every fallible operation in the workspace returns [`AppResult`]. The
//! [`ErrorCode`] distinguishes startup-fatal faults (bad datasets, bad
//! configuration, incomplete lookup tables) from the recoverable
//! [`ErrorCode::ValidationFailed`], which carries every field-level message
//! collected for a request.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::io;
use thiserror::Error;

/// Standard error codes used throughout the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Missing, empty, or malformed source dataset
    #[serde(rename = "DATA_ERROR")]
    DataError,
    /// User input outside the accepted ranges
    #[serde(rename = "VALIDATION_FAILED")]
    ValidationFailed,
    /// Prediction against an unfitted or structurally mismatched model
    #[serde(rename = "ALIGNMENT_ERROR")]
    AlignmentError,
    /// Missing table entry for a closed enum key
    #[serde(rename = "LOOKUP_ERROR")]
    LookupError,
    /// Configuration value could not be parsed or is out of range
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::DataError => "Training data is missing or malformed",
            Self::ValidationFailed => "The provided input is invalid",
            Self::AlignmentError => "Prediction input does not match the fitted model",
            Self::LookupError => "Recommendation table is missing a required entry",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
        }
    }

    /// Whether this error must halt startup rather than fail a single request
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(
            self,
            Self::DataError | Self::ConfigInvalid | Self::LookupError
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DataError => "DATA_ERROR",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::AlignmentError => "ALIGNMENT_ERROR",
            Self::LookupError => "LOOKUP_ERROR",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::InternalError => "INTERNAL_ERROR",
        };
        f.write_str(name)
    }
}

/// Unified error type for the workspace
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Field-level messages, populated for validation failures
    pub violations: Vec<String>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            violations: Vec::new(),
            source: None,
        }
    }

    /// Missing, empty, or malformed dataset
    pub fn data(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DataError, message)
    }

    /// Validation failure carrying every violated field message
    #[must_use]
    pub fn validation(violations: Vec<String>) -> Self {
        let message = match violations.len() {
            1 => "1 input value is out of range".to_owned(),
            n => format!("{n} input values are out of range"),
        };
        Self {
            code: ErrorCode::ValidationFailed,
            message,
            violations,
            source: None,
        }
    }

    /// Prediction attempted against an unfitted or mismatched model
    pub fn alignment(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AlignmentError, message)
    }

    /// Closed-enum key missing from a lookup table
    pub fn lookup(table: &str, key: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::LookupError,
            format!("table '{table}' has no entry for '{key}'"),
        )
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Field-level messages (empty unless this is a validation failure)
    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)?;
        if !self.violations.is_empty() {
            write!(f, " ({})", self.violations.join("; "))?;
        }
        Ok(())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Serializable error payload for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Field-level messages
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub violations: Vec<String>,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            code: error.code,
            message: error.message.clone(),
            violations: error.violations.clone(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(format!("{error:#}"))
    }
}

impl From<csv::Error> for AppError {
    fn from(error: csv::Error) -> Self {
        let message = match error.position() {
            Some(position) => format!("CSV error at line {}: {error}", position.line()),
            None => format!("CSV error: {error}"),
        };
        Self::data(message).with_source(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::data(format!("I/O error: {error}")).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::config(format!("JSON error: {error}")).with_source(error)
    }
}
