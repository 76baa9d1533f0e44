//! Foundational types: identifiers, triggers, events, recovery mechanisms,
//! engine configuration, and the shared validation error taxonomy.

pub mod config;
pub mod event;
pub mod id;
pub mod recovery;
pub mod trigger;

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors arising from malformed constructor arguments.
///
/// These are synchronous, caller-visible rejections. An input that fails
/// validation is never partially applied and never retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: Decimal },
    #[error("{field} cannot be negative, got {value}")]
    Negative { field: &'static str, value: Decimal },
    #[error("{field} must be a positive duration")]
    NonPositiveDuration { field: &'static str },
    #[error("maximum auction duration must be greater than minimum")]
    DurationOrdering,
    #[error("auto-extend threshold cannot be negative")]
    NegativeThreshold,
}

/// Reject a non-positive monetary or ratio value.
pub(crate) fn require_positive(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}

/// Reject a negative monetary or ratio value (zero is allowed).
pub(crate) fn require_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

/// Reject an empty caller-supplied identifier.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}
