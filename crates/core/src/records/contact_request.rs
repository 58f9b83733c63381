//! Contact request record.

use std::ops::Deref;

use crate::types::{Email, UserId};
use crate::validation::{
    Field, NAME_MAX, ValidationErrors, validate_email, validate_message, validate_person_name,
};

/// A contact form submission proposed for insertion.
///
/// New requests get the default [`ContactStatus`](crate::ContactStatus); the
/// timestamps are left to the column defaults.
/// `subject` is stored as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactRequest {
    pub user_id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl NewContactRequest {
    /// Run every contact request field rule.
    ///
    /// # Errors
    ///
    /// Returns all failing fields if any rule fails.
    pub fn validate(&self) -> Result<ValidContactRequest<'_>, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        errors.check(Field::Name, validate_person_name(&self.name, NAME_MAX));
        let email = errors.check(
            Field::Email,
            validate_email(&self.email, Email::CONTACT_MAX_LENGTH),
        );
        errors.check(Field::Message, validate_message(&self.message));

        match email {
            Some(email) if errors.is_empty() => Ok(ValidContactRequest {
                request: self,
                email,
            }),
            _ => Err(errors),
        }
    }
}

/// A [`NewContactRequest`] that passed validation.
#[derive(Debug, Clone)]
pub struct ValidContactRequest<'a> {
    request: &'a NewContactRequest,
    email: Email,
}

impl ValidContactRequest<'_> {
    /// The parsed email address.
    #[must_use]
    pub const fn email_address(&self) -> &Email {
        &self.email
    }
}

impl Deref for ValidContactRequest<'_> {
    type Target = NewContactRequest;

    fn deref(&self) -> &Self::Target {
        self.request
    }
}
