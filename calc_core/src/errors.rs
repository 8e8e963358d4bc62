//! # Error Types
//!
//! Structured error types for calc_core. Every failing operation returns one
//! of three kinds, so callers can match on the variant (or on
//! [`CalcError::error_code`]) instead of parsing messages.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn checked_reciprocal(x: f64) -> CalcResult<f64> {
//!     if x == 0.0 {
//!         return Err(CalcError::division_by_zero("reciprocal"));
//!     }
//!     Ok(1.0 / x)
//! }
//!
//! assert_eq!(checked_reciprocal(0.0).unwrap_err().error_code(), "DIVISION_BY_ZERO");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculator operations.
///
/// No operation recovers from these internally, and none leaves partial
/// state behind: validation always runs before mutation.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An operand was not an integer or floating-point value
    #[error("Expected {expected}, got {actual}")]
    TypeKind { expected: String, actual: String },

    /// A divisor (direct or chained) was exactly zero
    #[error("Cannot divide by zero in '{operation}'")]
    DivisionByZero { operation: String },

    /// A domain constraint was violated
    #[error("Invalid operation '{operation}': {reason}")]
    InvalidOperation { operation: String, reason: String },
}

impl CalcError {
    /// Create a TypeKind error
    pub fn type_kind(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        CalcError::TypeKind {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(operation: impl Into<String>) -> Self {
        CalcError::DivisionByZero {
            operation: operation.into(),
        }
    }

    /// Create an InvalidOperation error
    pub fn invalid_operation(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidOperation {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// A chain step or `get_result` was called before `chain()`
    pub fn chain_not_initialized(operation: impl Into<String>) -> Self {
        CalcError::invalid_operation(operation, "Chain not initialized. Call chain() first.")
    }

    /// A statistics function received no values
    pub fn empty_input(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        let reason = format!("Cannot calculate {operation} of empty list");
        CalcError::InvalidOperation { operation, reason }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::TypeKind { .. } => "TYPE_ERROR",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::InvalidOperation { .. } => "INVALID_OPERATION",
        }
    }
}
