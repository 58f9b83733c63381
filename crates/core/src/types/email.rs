//! Email address type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pattern every stored email address must match.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("Invalid regex"));

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty or whitespace.
    #[error("email cannot be empty or whitespace")]
    Empty,
    /// The input does not look like `local@domain.tld`.
    #[error("invalid email format")]
    InvalidFormat,
    /// The input string is too long.
    #[error("email must be less than {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// An email address.
///
/// The maximum length depends on the column it is stored in (120 characters
/// for contact requests, 255 for users), so it is passed to [`Email::parse`].
///
/// ## Examples
///
/// ```
/// use synthseed_core::Email;
///
/// // Valid emails
/// assert!(Email::parse("user@example.com", 255).is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk", 255).is_ok());
///
/// // Invalid emails
/// assert!(Email::parse("", 255).is_err());              // empty
/// assert!(Email::parse("no-at-symbol", 255).is_err());  // missing @
/// assert!(Email::parse("user@example.c", 255).is_err()); // one-letter TLD
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length for a user's email address.
    pub const USER_MAX_LENGTH: usize = 255;

    /// Maximum length for a contact request's email address.
    pub const CONTACT_MAX_LENGTH: usize = 120;

    /// Parse an `Email` from a string, enforcing `max_len` characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty or whitespace
    /// - Does not match [`EMAIL_PATTERN`]
    /// - Is longer than `max_len` characters
    pub fn parse(s: &str, max_len: usize) -> Result<Self, EmailError> {
        if s.trim().is_empty() {
            return Err(EmailError::Empty);
        }

        if !EMAIL_RE.is_match(s) {
            return Err(EmailError::InvalidFormat);
        }

        if s.chars().count() > max_len {
            return Err(EmailError::TooLong { max: max_len });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("user@example.com", 255).is_ok());
        assert!(Email::parse("user.name@example.com", 255).is_ok());
        assert!(Email::parse("user+tag@example.com", 255).is_ok());
        assert!(Email::parse("user_%-@subdomain.example.com", 255).is_ok());
        assert!(Email::parse("user@example.co.uk", 255).is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Email::parse("", 255), Err(EmailError::Empty));
        assert_eq!(Email::parse("   ", 255), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_invalid_format() {
        for input in [
            "no-at-symbol",
            "@domain.com",
            "user@",
            "user@domain",
            "user@domain.c",
            "user name@domain.com",
            "user@domain.com ",
            "user@@domain.com",
        ] {
            assert_eq!(
                Email::parse(input, 255),
                Err(EmailError::InvalidFormat),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_too_long_depends_on_limit() {
        let long = format!("{}@example.com", "a".repeat(110));
        assert_eq!(long.len(), 122);
        assert_eq!(
            Email::parse(&long, Email::CONTACT_MAX_LENGTH),
            Err(EmailError::TooLong { max: 120 })
        );
        assert!(Email::parse(&long, Email::USER_MAX_LENGTH).is_ok());
    }

    #[test]
    fn test_display() {
        let email = Email::parse("user@example.com", 255).unwrap();
        assert_eq!(format!("{email}"), "user@example.com");
    }
}
