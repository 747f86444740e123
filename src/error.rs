//! Error types for time-value-of-money calculations

use thiserror::Error;

/// Result alias used throughout the library
pub type FinanceResult<T> = Result<T, FinanceError>;

/// Failures surfaced by the calculators and their input layers.
///
/// Arithmetic and shape failures are propagated to the caller unchanged;
/// nothing in the library recovers from them or substitutes a default.
#[derive(Error, Debug)]
pub enum FinanceError {
    /// A value of the wrong shape was used where a number or series was required
    #[error("Type mismatch for `{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    /// A closed-form denominator evaluated to exactly zero
    #[error("Division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    /// Structurally invalid input (e.g. a gap in a CSV cash-flow series)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FinanceError {
    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            found: found.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// True for the two arithmetic/type failures the calculators themselves raise
    pub fn is_calculation_error(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. } | Self::DivisionByZero { .. })
    }
}
