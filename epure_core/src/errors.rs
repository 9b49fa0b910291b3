//! # Error Types
//!
//! Structured error types for epure_core. Layout and sampling never fail:
//! degenerate input is absorbed with a safe fallback. Errors are reserved for
//! user-facing operations (point queries, report generation, file I/O).
//!
//! ## Example
//!
//! ```rust
//! use epure_core::errors::{EpureError, EpureResult};
//!
//! fn validate_step(step: f64) -> EpureResult<()> {
//!     if !step.is_finite() {
//!         return Err(EpureError::InvalidInput {
//!             field: "step".to_string(),
//!             value: step.to_string(),
//!             reason: "Step must be a finite number".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for epure_core operations
pub type EpureResult<T> = Result<T, EpureError>;

/// Structured error type for post-processing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EpureError {
    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A query referenced a rod id that is not part of the current results
    #[error("Rod not found: {rod_id}")]
    RodNotFound { rod_id: u32 },

    /// No document could be produced
    #[error("Report generation failed: {reason}")]
    ReportFailed { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl EpureError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EpureError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a RodNotFound error
    pub fn rod_not_found(rod_id: u32) -> Self {
        EpureError::RodNotFound { rod_id }
    }

    /// Create a ReportFailed error
    pub fn report_failed(reason: impl Into<String>) -> Self {
        EpureError::ReportFailed {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EpureError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure needs the user's acknowledgement before continuing
    pub fn requires_acknowledgement(&self) -> bool {
        matches!(self, EpureError::ReportFailed { .. } | EpureError::FileError { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EpureError::InvalidInput { .. } => "INVALID_INPUT",
            EpureError::RodNotFound { .. } => "ROD_NOT_FOUND",
            EpureError::ReportFailed { .. } => "REPORT_FAILED",
            EpureError::FileError { .. } => "FILE_ERROR",
            EpureError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for EpureError {
    fn from(e: serde_json::Error) -> Self {
        EpureError::SerializationError {
            reason: e.to_string(),
        }
    }
}
