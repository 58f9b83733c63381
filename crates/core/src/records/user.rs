//! User record.

use std::ops::Deref;

use chrono::NaiveDate;
use secrecy::SecretString;

use crate::types::Email;
use crate::validation::{
    FIRST_NAME_MAX, Field, LAST_NAME_MAX, ValidationErrors, validate_address,
    validate_date_of_birth, validate_email, validate_person_name, validate_phone, validate_place,
    validate_postcode,
};

/// A user account proposed for insertion.
///
/// New users get the default [`UserRole`](crate::UserRole); `enabled`,
/// `failed_login_attempts` and the timestamps are left to the column
/// defaults. The password is plain text here and is hashed on the insert
/// path.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postcode: String,
    pub phone: String,
    /// Date of birth as `YYYY-MM-DD`.
    pub dob: String,
    pub email: String,
    pub password: SecretString,
}

impl NewUser {
    /// Run every user field rule.
    ///
    /// # Errors
    ///
    /// Returns all failing fields if any rule fails.
    pub fn validate(&self) -> Result<ValidUser<'_>, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        errors.check(
            Field::FirstName,
            validate_person_name(&self.first_name, FIRST_NAME_MAX),
        );
        errors.check(
            Field::LastName,
            validate_person_name(&self.last_name, LAST_NAME_MAX),
        );
        let email = errors.check(
            Field::Email,
            validate_email(&self.email, Email::USER_MAX_LENGTH),
        );
        errors.check(Field::Phone, validate_phone(&self.phone));
        errors.check(Field::Address, validate_address(&self.address));
        errors.check(Field::Postcode, validate_postcode(&self.postcode));
        errors.check(Field::City, validate_place(&self.city));
        errors.check(Field::State, validate_place(&self.state));
        errors.check(Field::Country, validate_place(&self.country));
        let dob = errors.check(Field::DateOfBirth, validate_date_of_birth(&self.dob));

        match (email, dob) {
            (Some(email), Some(dob)) if errors.is_empty() => Ok(ValidUser {
                user: self,
                email,
                dob,
            }),
            _ => Err(errors),
        }
    }
}

/// A [`NewUser`] that passed validation.
#[derive(Debug, Clone)]
pub struct ValidUser<'a> {
    user: &'a NewUser,
    email: Email,
    dob: NaiveDate,
}

impl ValidUser<'_> {
    /// The parsed email address.
    #[must_use]
    pub const fn email_address(&self) -> &Email {
        &self.email
    }

    /// The parsed date of birth.
    #[must_use]
    pub const fn date_of_birth(&self) -> NaiveDate {
        self.dob
    }
}

impl Deref for ValidUser<'_> {
    type Target = NewUser;

    fn deref(&self) -> &Self::Target {
        self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Violation;

    fn sample() -> NewUser {
        NewUser {
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            address: "123 Main St, Apt 4B".to_owned(),
            city: "Springfield".to_owned(),
            state: "IL".to_owned(),
            country: "USA".to_owned(),
            postcode: "62701".to_owned(),
            phone: "1234567890".to_owned(),
            dob: "1990-01-01".to_owned(),
            email: "johndoe@gmail.com".to_owned(),
            password: SecretString::from("SecurePassword123!"),
        }
    }

    #[test]
    fn test_valid_user_passes() {
        let user = sample();
        let valid = user.validate().expect("sample user is valid");
        assert_eq!(valid.email_address().as_str(), "johndoe@gmail.com");
        assert_eq!(valid.date_of_birth().to_string(), "1990-01-01");
    }

    #[test]
    fn test_leading_digit_first_name_rejected() {
        let user = NewUser {
            first_name: "123Bob".to_owned(),
            ..sample()
        };
        let errors = user.validate().expect_err("leading digit");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.violation(Field::FirstName),
            Some(Violation::StartsWithDigit)
        );
    }

    #[test]
    fn test_all_failures_are_collected() {
        let user = NewUser {
            last_name: "A-very-long-last-name-indeed".to_owned(),
            phone: "12-34".to_owned(),
            city: "St. Louis".to_owned(),
            dob: "yesterday".to_owned(),
            ..sample()
        };
        let errors = user.validate().expect_err("several bad fields");
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(Field::LastName));
        assert!(errors.contains(Field::Phone));
        assert!(errors.contains(Field::City));
        assert!(errors.contains(Field::DateOfBirth));
    }

    #[test]
    fn test_each_place_field_checks_its_own_value() {
        let user = NewUser {
            state: "N3w York".to_owned(),
            ..sample()
        };
        let errors = user.validate().expect_err("bad state");
        assert!(errors.contains(Field::State));
        assert!(!errors.contains(Field::City));
        assert!(!errors.contains(Field::Country));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let user = NewUser {
            email: "not-an-email".to_owned(),
            ..sample()
        };
        assert_eq!(
            user.validate().expect_err("first"),
            user.validate().expect_err("second")
        );
    }
}
