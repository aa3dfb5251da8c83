//! Error types for cairn operations.
//!
//! This module defines [`CairnError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CairnError::Validation` when a step's configuration-time or
//!   pre-run-time contract is violated; it always names the offending step
//! - Use `anyhow::Error` (via `CairnError::Other`) for unexpected errors
//!   inside step implementations
//! - All errors should provide actionable messages for users

use thiserror::Error;

/// Core error type for cairn operations.
#[derive(Debug, Error)]
pub enum CairnError {
    /// A step's configuration or pre-run validation failed.
    #[error("Step '{step}' failed validation: {message}")]
    Validation { step: String, message: String },

    /// Option registration or configuration parsing failed.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CairnError {
    /// Create a validation error naming the offending step.
    pub fn validation(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Whether this is a step-contract validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Result type alias for cairn operations.
pub type Result<T> = std::result::Result<T, CairnError>;
