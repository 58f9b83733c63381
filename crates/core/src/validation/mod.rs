//! Field-level validation rules.
//!
//! Every rule is a pure function from a field value to `Result<(), Violation>`
//! (or the parsed value, for dates). Rules report the first check that fails,
//! in this order: emptiness, length, surrounding whitespace, leading
//! character, character class.
//!
//! | Field | Rule |
//! |---|---|
//! | name / first name / last name | non-blank; at most 240 / 40 / 20 chars; no surrounding whitespace; starts with an ASCII letter |
//! | email | matches [`EMAIL_PATTERN`](crate::types::email::EMAIL_PATTERN); at most 120 (contact) / 255 (user) chars |
//! | message | 50 to 250 chars; non-blank |
//! | phone | 10 to 15 chars; ASCII digits only |
//! | address | non-blank; at most 200 chars; letters, digits, whitespace, `,` `.` `/` `-` |
//! | postcode | non-blank; ASCII alphanumeric |
//! | city / state / country | non-blank; ASCII letters and whitespace |
//! | date of birth | `YYYY-MM-DD` |

mod error;

pub use error::{Field, FieldError, ValidationErrors, Violation};

use chrono::NaiveDate;

use crate::types::email::{Email, EmailError};

/// Maximum length of a contact request sender name.
pub const NAME_MAX: usize = 240;

/// Maximum length of a user's first name.
pub const FIRST_NAME_MAX: usize = 40;

/// Maximum length of a user's last name.
pub const LAST_NAME_MAX: usize = 20;

/// Minimum length of a contact request message.
pub const MESSAGE_MIN: usize = 50;

/// Maximum length of a contact request message.
pub const MESSAGE_MAX: usize = 250;

/// Minimum number of digits in a phone number.
pub const PHONE_MIN: usize = 10;

/// Maximum number of digits in a phone number.
pub const PHONE_MAX: usize = 15;

/// Maximum length of a street address.
pub const ADDRESS_MAX: usize = 200;

/// Format accepted for dates of birth.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Validate a person's name (contact name, first name or last name).
///
/// # Errors
///
/// Returns the first [`Violation`] found.
///
/// # Examples
///
/// ```
/// use synthseed_core::validation::{validate_person_name, FIRST_NAME_MAX};
/// use synthseed_core::Violation;
///
/// assert!(validate_person_name("Bob", FIRST_NAME_MAX).is_ok());
/// assert_eq!(
///     validate_person_name("123Bob", FIRST_NAME_MAX),
///     Err(Violation::StartsWithDigit)
/// );
/// ```
pub fn validate_person_name(value: &str, max_len: usize) -> Result<(), Violation> {
    if is_blank(value) {
        return Err(Violation::Empty);
    }
    if char_len(value) > max_len {
        return Err(Violation::TooLong { max: max_len });
    }

    let mut chars = value.chars();
    let first = chars.next().ok_or(Violation::Empty)?;
    let last = chars.next_back().unwrap_or(first);

    if first.is_whitespace() || last.is_whitespace() {
        return Err(Violation::SurroundingWhitespace);
    }
    if first.is_ascii_digit() {
        return Err(Violation::StartsWithDigit);
    }
    if !first.is_ascii_alphabetic() {
        return Err(Violation::StartsWithSymbol);
    }
    Ok(())
}

/// Validate an email address against the shared pattern and a length limit.
///
/// Returns the parsed [`Email`] on success.
///
/// # Errors
///
/// Returns [`Violation::Empty`], [`Violation::InvalidFormat`] or
/// [`Violation::TooLong`].
pub fn validate_email(value: &str, max_len: usize) -> Result<Email, Violation> {
    Email::parse(value, max_len).map_err(|e| match e {
        EmailError::Empty => Violation::Empty,
        EmailError::InvalidFormat => Violation::InvalidFormat,
        EmailError::TooLong { max } => Violation::TooLong { max },
    })
}

/// Validate a contact request message body.
///
/// # Errors
///
/// Returns the first [`Violation`] found.
pub fn validate_message(value: &str) -> Result<(), Violation> {
    let len = char_len(value);
    if len < MESSAGE_MIN {
        return Err(Violation::TooShort { min: MESSAGE_MIN });
    }
    if len > MESSAGE_MAX {
        return Err(Violation::TooLong { max: MESSAGE_MAX });
    }
    if is_blank(value) {
        return Err(Violation::Empty);
    }
    Ok(())
}

/// Validate a phone number: digits only, 10 to 15 of them.
///
/// # Errors
///
/// Returns the first [`Violation`] found.
pub fn validate_phone(value: &str) -> Result<(), Violation> {
    if is_blank(value) {
        return Err(Violation::Empty);
    }
    if !(PHONE_MIN..=PHONE_MAX).contains(&char_len(value)) {
        return Err(Violation::LengthOutOfRange {
            min: PHONE_MIN,
            max: PHONE_MAX,
        });
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(Violation::NonDigit);
    }
    Ok(())
}

/// Validate a street address.
///
/// # Errors
///
/// Returns the first [`Violation`] found.
pub fn validate_address(value: &str) -> Result<(), Violation> {
    if is_blank(value) {
        return Err(Violation::Empty);
    }
    if char_len(value) > ADDRESS_MAX {
        return Err(Violation::TooLong { max: ADDRESS_MAX });
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || c.is_whitespace() || ",./-".contains(c);
    if !value.chars().all(allowed) {
        return Err(Violation::DisallowedCharacters {
            allowed: "letters, digits, spaces, comma, dot, slash or hyphen",
        });
    }
    Ok(())
}

/// Validate a postal code.
///
/// # Errors
///
/// Returns the first [`Violation`] found.
pub fn validate_postcode(value: &str) -> Result<(), Violation> {
    if is_blank(value) {
        return Err(Violation::Empty);
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Violation::DisallowedCharacters {
            allowed: "letters and digits",
        });
    }
    Ok(())
}

/// Validate a city, state or country name.
///
/// # Errors
///
/// Returns the first [`Violation`] found.
pub fn validate_place(value: &str) -> Result<(), Violation> {
    if is_blank(value) {
        return Err(Violation::Empty);
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        return Err(Violation::DisallowedCharacters {
            allowed: "letters and spaces",
        });
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date of birth.
///
/// # Errors
///
/// Returns [`Violation::Empty`] or [`Violation::InvalidDate`].
pub fn validate_date_of_birth(value: &str) -> Result<NaiveDate, Violation> {
    if is_blank(value) {
        return Err(Violation::Empty);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| Violation::InvalidDate)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_person_name_rules() {
        assert!(validate_person_name("Sarah Thompson", NAME_MAX).is_ok());
        assert!(validate_person_name("O'Brien", LAST_NAME_MAX).is_ok());
        assert_eq!(validate_person_name("", 40), Err(Violation::Empty));
        assert_eq!(validate_person_name("   ", 40), Err(Violation::Empty));
        assert_eq!(
            validate_person_name(" Bob", 40),
            Err(Violation::SurroundingWhitespace)
        );
        assert_eq!(
            validate_person_name("Bob ", 40),
            Err(Violation::SurroundingWhitespace)
        );
        assert_eq!(
            validate_person_name("9Lives", 40),
            Err(Violation::StartsWithDigit)
        );
        assert_eq!(
            validate_person_name("_Bob", 40),
            Err(Violation::StartsWithSymbol)
        );
        assert_eq!(
            validate_person_name("Élodie", 40),
            Err(Violation::StartsWithSymbol)
        );
    }

    #[test]
    fn test_person_name_length_limits() {
        let twenty = "A".repeat(LAST_NAME_MAX);
        assert!(validate_person_name(&twenty, LAST_NAME_MAX).is_ok());
        let twenty_one = "A".repeat(LAST_NAME_MAX + 1);
        assert_eq!(
            validate_person_name(&twenty_one, LAST_NAME_MAX),
            Err(Violation::TooLong { max: 20 })
        );
        assert!(validate_person_name(&twenty_one, FIRST_NAME_MAX).is_ok());
    }

    #[test]
    fn test_email_limits_per_record_type() {
        let email = format!("{}@example.com", "a".repeat(120));
        assert_eq!(
            validate_email(&email, 120),
            Err(Violation::TooLong { max: 120 })
        );
        assert!(validate_email(&email, 255).is_ok());
        assert_eq!(validate_email("nope", 255), Err(Violation::InvalidFormat));
        assert_eq!(validate_email(" ", 255), Err(Violation::Empty));
    }

    #[test]
    fn test_message_bounds_are_inclusive() {
        assert_eq!(
            validate_message(&"a".repeat(49)),
            Err(Violation::TooShort { min: 50 })
        );
        assert!(validate_message(&"a".repeat(50)).is_ok());
        assert!(validate_message(&"a".repeat(250)).is_ok());
        assert_eq!(
            validate_message(&"a".repeat(251)),
            Err(Violation::TooLong { max: 250 })
        );
        assert_eq!(validate_message(&" ".repeat(60)), Err(Violation::Empty));
    }

    #[test]
    fn test_phone_rules() {
        assert!(validate_phone("1234567890").is_ok());
        assert!(validate_phone("123456789012345").is_ok());
        assert_eq!(validate_phone(""), Err(Violation::Empty));
        assert_eq!(
            validate_phone("123456789"),
            Err(Violation::LengthOutOfRange { min: 10, max: 15 })
        );
        assert_eq!(
            validate_phone("1234567890123456"),
            Err(Violation::LengthOutOfRange { min: 10, max: 15 })
        );
        assert_eq!(validate_phone("+123456789012"), Err(Violation::NonDigit));
        assert_eq!(validate_phone("555-123-4567"), Err(Violation::NonDigit));
    }

    #[test]
    fn test_address_rules() {
        assert!(validate_address("123 Main St, Apt 4B").is_ok());
        assert!(validate_address("12/3 North-East Rd.").is_ok());
        assert_eq!(validate_address(""), Err(Violation::Empty));
        assert!(matches!(
            validate_address("Flat #5"),
            Err(Violation::DisallowedCharacters { .. })
        ));
        assert_eq!(
            validate_address(&"a".repeat(201)),
            Err(Violation::TooLong { max: 200 })
        );
    }

    #[test]
    fn test_postcode_rules() {
        assert!(validate_postcode("62701").is_ok());
        assert!(validate_postcode("SW1A1AA").is_ok());
        assert_eq!(validate_postcode(" "), Err(Violation::Empty));
        assert!(matches!(
            validate_postcode("SW1A 1AA"),
            Err(Violation::DisallowedCharacters { .. })
        ));
        assert!(matches!(
            validate_postcode("62701-1234"),
            Err(Violation::DisallowedCharacters { .. })
        ));
    }

    #[test]
    fn test_place_rules() {
        assert!(validate_place("Springfield").is_ok());
        assert!(validate_place("New South Wales").is_ok());
        assert_eq!(validate_place(""), Err(Violation::Empty));
        assert!(matches!(
            validate_place("St. Louis"),
            Err(Violation::DisallowedCharacters { .. })
        ));
        assert!(matches!(
            validate_place("District 9"),
            Err(Violation::DisallowedCharacters { .. })
        ));
    }

    #[test]
    fn test_date_of_birth() {
        assert_eq!(
            validate_date_of_birth("1990-01-01").ok(),
            NaiveDate::from_ymd_opt(1990, 1, 1)
        );
        assert_eq!(validate_date_of_birth(""), Err(Violation::Empty));
        assert_eq!(
            validate_date_of_birth("01/01/1990"),
            Err(Violation::InvalidDate)
        );
        assert_eq!(
            validate_date_of_birth("1990-02-30"),
            Err(Violation::InvalidDate)
        );
    }

    proptest! {
        #[test]
        fn prop_name_starting_with_digit_fails(digit in 0u8..10, rest in "[a-zA-Z]{0,10}") {
            let name = format!("{digit}{rest}");
            prop_assert_eq!(validate_person_name(&name, NAME_MAX), Err(Violation::StartsWithDigit));
        }

        #[test]
        fn prop_name_starting_with_symbol_fails(
            symbol in prop::sample::select(vec!['!', '@', '#', '$', '%', '-', '_', '.', '\'', '(']),
            rest in "[a-zA-Z]{0,10}",
        ) {
            let name = format!("{symbol}{rest}");
            prop_assert_eq!(validate_person_name(&name, NAME_MAX), Err(Violation::StartsWithSymbol));
        }

        #[test]
        fn prop_name_with_surrounding_whitespace_fails(core in "[A-Za-z][a-z]{0,10}", leading in any::<bool>()) {
            let name = if leading { format!(" {core}") } else { format!("{core} ") };
            prop_assert_eq!(validate_person_name(&name, NAME_MAX), Err(Violation::SurroundingWhitespace));
        }

        #[test]
        fn prop_name_over_limit_fails(max in 1usize..60, extra in 1usize..20) {
            let name = "A".repeat(max + extra);
            prop_assert_eq!(validate_person_name(&name, max), Err(Violation::TooLong { max }));
        }

        #[test]
        fn prop_well_formed_names_pass(name in "[A-Za-z][A-Za-z '-]{0,30}[A-Za-z]") {
            prop_assert!(validate_person_name(&name, FIRST_NAME_MAX).is_ok());
        }

        #[test]
        fn prop_email_without_at_fails(local in "[a-zA-Z0-9._%+-]{1,30}") {
            prop_assert_eq!(validate_email(&local, 255), Err(Violation::InvalidFormat));
        }

        #[test]
        fn prop_well_formed_email_respects_limit(
            local in "[a-z0-9._%+-]{1,64}",
            domain in "[a-z0-9-]{1,40}",
            tld in "[a-z]{2,6}",
        ) {
            let email = format!("{local}@{domain}.{tld}");
            let outcome = validate_email(&email, Email::CONTACT_MAX_LENGTH);
            if email.len() > Email::CONTACT_MAX_LENGTH {
                prop_assert_eq!(outcome, Err(Violation::TooLong { max: 120 }));
            } else {
                prop_assert!(outcome.is_ok());
            }
        }

        #[test]
        fn prop_message_length_decides(len in 0usize..400) {
            let message = "m".repeat(len);
            let outcome = validate_message(&message);
            prop_assert_eq!(outcome.is_ok(), (MESSAGE_MIN..=MESSAGE_MAX).contains(&len));
        }

        #[test]
        fn prop_validators_are_pure(value in ".{0,300}") {
            prop_assert_eq!(validate_person_name(&value, NAME_MAX), validate_person_name(&value, NAME_MAX));
            prop_assert_eq!(validate_email(&value, 255), validate_email(&value, 255));
            prop_assert_eq!(validate_message(&value), validate_message(&value));
            prop_assert_eq!(validate_phone(&value), validate_phone(&value));
            prop_assert_eq!(validate_address(&value), validate_address(&value));
        }
    }
}
