//! Error types for loan calculations and the input layer.

use thiserror::Error;

/// Result type for core loan operations.
pub type LoanResult<T> = Result<T, LoanError>;

/// Errors raised by the calculation core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    /// A loan term violates a precondition of the payment formula.
    #[error("Invalid loan terms: {field} {reason}")]
    InvalidLoanTerms {
        /// Name of the offending term.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A payment date falls outside the representable calendar.
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl LoanError {
    pub(crate) fn terms(field: &'static str, reason: impl Into<String>) -> Self {
        LoanError::InvalidLoanTerms {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised while turning user text into loan terms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid frequency '{0}'. Use annual, semi-annual, quarterly or monthly.")]
    InvalidFrequency(String),

    #[error("Invalid {field} '{value}'. Please enter only a numeric value.")]
    NonNumericInput { field: &'static str, value: String },
}
