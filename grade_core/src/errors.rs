//! # Error Types
//!
//! Structured error types for grade_core. Numeric edge cases (zero total
//! marks, empty semesters, no remaining credit hours) are never errors; they
//! resolve to `0` or `None` in the calculation functions. These variants
//! cover the remaining failure modes: bad record input, invalid custom grade
//! scales, and storage/serialization problems.
//!
//! ## Example
//!
//! ```rust
//! use grade_core::errors::{GradeError, GradeResult};
//!
//! fn validate_credits(credit_hours: u32) -> GradeResult<()> {
//!     if credit_hours == 0 {
//!         return Err(GradeError::InvalidInput {
//!             field: "credit_hours".to_string(),
//!             value: credit_hours.to_string(),
//!             reason: "Credit hours must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for grade_core operations
pub type GradeResult<T> = Result<T, GradeError>;

/// Structured error type for grade engine operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum GradeError {
    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A custom grade scale breaks the table invariants
    #[error("Invalid grade scale: {reason}")]
    InvalidScale { reason: String },

    /// A named semester or course does not exist in the record
    #[error("{kind} not found: {name}")]
    NotFound { kind: String, name: String },

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

impl GradeError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        GradeError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidScale error
    pub fn invalid_scale(reason: impl Into<String>) -> Self {
        GradeError::InvalidScale {
            reason: reason.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        GradeError::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        GradeError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        GradeError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            GradeError::InvalidInput { .. } => "INVALID_INPUT",
            GradeError::InvalidScale { .. } => "INVALID_SCALE",
            GradeError::NotFound { .. } => "NOT_FOUND",
            GradeError::FileError { .. } => "FILE_ERROR",
            GradeError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for GradeError {
    fn from(e: serde_json::Error) -> Self {
        GradeError::serialization(e.to_string())
    }
}
