//! Generation prompts.
//!
//! Each prompt spells out the field rules enforced by
//! [`synthseed_core::validation`] and shows a two-record example, so that most
//! generated records pass validation on the first try.

use std::collections::BTreeSet;
use std::fmt::Write as _;

const OUTPUT_INSTRUCTION: &str = "Output the result strictly as a valid JSON array of objects. \
Do not include any explanation or extra text.";

const USER_EXAMPLE: &str = r#"[
  {
    "firstName": "John",
    "lastName": "Doe",
    "email": "johndoe@gmail.com",
    "password": "SecurePassword123!",
    "address": "123 Main St, Apt 4B",
    "city": "Springfield",
    "state": "IL",
    "country": "USA",
    "postcode": "62701",
    "phone": "1234567890",
    "dob": "1990-01-01"
  },
  {
    "firstName": "Jane",
    "lastName": "Smith",
    "email": "jane.smith@gmail.com",
    "password": "AnotherSecurePassword456@",
    "address": "456 Elm St, Suite 5",
    "city": "Shelbyville",
    "state": "IL",
    "country": "USA",
    "postcode": "62565",
    "phone": "0987654321",
    "dob": "1985-05-15"
  }
]"#;

const CONTACT_REQUEST_EXAMPLE: &str = r#"[
  {
    "name": "Sarah Thompson",
    "email": "sarah.thompson@example.com",
    "subject": "Inquiry about services",
    "message": "Hi, I recently visited your website and wanted to know more about the services you offer. Please get back to me with more details."
  },
  {
    "name": "Michael Reyes",
    "email": "michael.reyes@example.com",
    "subject": "Support Request",
    "message": "I'm having trouble accessing my account. I've tried resetting the password but still can't log in. Could someone assist me?"
  }
]"#;

/// Build the prompt asking for `count` users, avoiding `avoid_emails`.
#[must_use]
pub fn user_prompt(count: usize, avoid_emails: &BTreeSet<String>) -> String {
    let mut prompt = format!(
        "Generate {count} realistic but fictional users. Each user must include the following fields:

- firstName: A non-empty string (max 40 characters). It must start with a letter and must not start or end with spaces.
- lastName: A non-empty string (max 20 characters). It must start with a letter and must not start or end with spaces.
- email: Must be a valid email format, max 255 characters. Every email must be unique.
- password: 8 to 50 characters, including uppercase, lowercase, a number, and a special symbol.
- address: Non-empty (max 200 characters). Allowed characters: letters, digits, space, comma, dot, slash, and hyphen only.
- city: Non-empty. Letters and spaces only.
- state: Non-empty. Letters and spaces only.
- country: Non-empty. Letters and spaces only.
- postcode: Non-empty. Letters and digits only, no spaces or special characters.
- phone: String of digits only, between 10 and 15 characters.
- dob: Date of birth in YYYY-MM-DD format (age between 18 and 100).

Example:
{USER_EXAMPLE}
"
    );

    if !avoid_emails.is_empty() {
        let joined = avoid_emails
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(prompt, "Avoid emails: {joined}.");
    }

    prompt.push_str(OUTPUT_INSTRUCTION);
    prompt
}

/// Build the prompt asking for `count` contact requests.
#[must_use]
pub fn contact_request_prompt(count: usize) -> String {
    format!(
        "Generate {count} fictional but realistic contact request records.

Each contact request must include:
- name: Required. Must start with a letter, must not start or end with spaces. Max length: 240 characters.
- email: Required. Must be a valid email format and less than 120 characters.
- subject: A short subject string.
- message: Required. Between 50 and 250 characters. Cannot be just whitespace.

Rules:
- Do not use real user data.
- Keep the tone of the message field friendly and natural.
- Ensure emails are unique and valid.

Example:
{CONTACT_REQUEST_EXAMPLE}
{OUTPUT_INSTRUCTION}"
    )
}
