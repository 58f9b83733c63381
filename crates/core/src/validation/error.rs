//! Validation error types.

use core::fmt;

use thiserror::Error;

/// A record field subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Contact request sender name.
    Name,
    FirstName,
    LastName,
    Email,
    /// Contact request body.
    Message,
    Phone,
    Address,
    Postcode,
    City,
    State,
    Country,
    DateOfBirth,
}

impl Field {
    /// Human-readable field label used in log lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Email => "email",
            Self::Message => "message",
            Self::Phone => "phone number",
            Self::Address => "address",
            Self::Postcode => "postal code",
            Self::City => "city",
            Self::State => "state",
            Self::Country => "country",
            Self::DateOfBirth => "date of birth",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a single field value was rejected.
///
/// Messages are phrased to follow the field label, e.g.
/// `first name` + `cannot start with a number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("cannot be empty or whitespace")]
    Empty,

    #[error("must be less than {max} characters")]
    TooLong {
        /// Maximum allowed length in characters.
        max: usize,
    },

    #[error("must be at least {min} characters long")]
    TooShort {
        /// Minimum allowed length in characters.
        min: usize,
    },

    #[error("must be between {min} and {max} characters")]
    LengthOutOfRange {
        /// Minimum allowed length in characters.
        min: usize,
        /// Maximum allowed length in characters.
        max: usize,
    },

    #[error("cannot start or end with a space")]
    SurroundingWhitespace,

    #[error("cannot start with a number")]
    StartsWithDigit,

    #[error("cannot start with a special character")]
    StartsWithSymbol,

    #[error("has an invalid format")]
    InvalidFormat,

    #[error("can only contain numbers")]
    NonDigit,

    #[error("can only contain {allowed}")]
    DisallowedCharacters {
        /// Description of the permitted character set.
        allowed: &'static str,
    },

    #[error("must be a date in YYYY-MM-DD format")]
    InvalidDate,
}

/// A violation attached to the field it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field} {violation}")]
pub struct FieldError {
    /// The offending field.
    pub field: Field,
    /// What was wrong with it.
    pub violation: Violation,
}

/// Every field-level failure found in one record.
///
/// A record is valid only when this collection is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Record the outcome of one rule, returning the value on success.
    pub fn check<T>(&mut self, field: Field, outcome: Result<T, Violation>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(violation) => {
                self.0.push(FieldError { field, violation });
                None
            }
        }
    }

    /// Returns `true` if no field failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the failures in the order they were checked.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Returns `true` if `field` has at least one failure.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// The violation recorded for `field`, if any.
    #[must_use]
    pub fn violation(&self, field: Field) -> Option<Violation> {
        self.0.iter().find(|e| e.field == field).map(|e| e.violation)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed")?;
        for (i, error) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
