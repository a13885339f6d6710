//! Precondition guards for constructing entities and predicates.
//!
//! # Responsibility
//! - Provide the common precondition checks callers run before building
//!   domain values: required, non-empty, in-range, non-zero.
//!
//! # Invariants
//! - A passing guard returns the checked value unchanged.
//! - A failing guard reports the offending parameter by name.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GuardResult<T> = Result<T, ValidationError>;

/// Precondition violation raised by a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Missing { field: &'static str },
    Empty { field: &'static str },
    InvalidRange { field: &'static str },
    OutOfRange { field: &'static str },
    Zero { field: &'static str },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "required input `{field}` was missing"),
            Self::Empty { field } => write!(f, "required input `{field}` was empty"),
            Self::InvalidRange { field } => {
                write!(f, "range for `{field}` must have from <= to")
            }
            Self::OutOfRange { field } => write!(f, "input `{field}` was out of range"),
            Self::Zero { field } => write!(f, "required input `{field}` cannot be zero"),
        }
    }
}

impl Error for ValidationError {}

/// Requires an optional value to be present.
pub fn required<T>(value: Option<T>, field: &'static str) -> GuardResult<T> {
    value.ok_or(ValidationError::Missing { field })
}

/// Requires a string to contain at least one non-whitespace character.
pub fn not_empty<'a>(value: &'a str, field: &'static str) -> GuardResult<&'a str> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(value)
}

/// Requires `from <= value <= to`.
///
/// # Errors
/// - `InvalidRange` when the bounds themselves are inverted.
/// - `OutOfRange` when the value falls outside them.
pub fn in_range<T: PartialOrd>(value: T, from: T, to: T, field: &'static str) -> GuardResult<T> {
    if from > to {
        return Err(ValidationError::InvalidRange { field });
    }
    if value < from || value > to {
        return Err(ValidationError::OutOfRange { field });
    }
    Ok(value)
}

/// Requires a numeric value to differ from its type's zero.
pub fn non_zero<T: Default + PartialEq>(value: T, field: &'static str) -> GuardResult<T> {
    if value == T::default() {
        return Err(ValidationError::Zero { field });
    }
    Ok(value)
}
