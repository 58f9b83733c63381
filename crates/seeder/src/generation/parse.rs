//! Turning raw model output into typed records.

use std::fmt;

use serde::Deserialize;
use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde_json::Value;
use tracing::{error, warn};

use synthseed_core::UserId;

use super::GenerationError;

/// Remove optional Markdown code fencing around a JSON payload.
///
/// Handles a leading ```` ```json ```` or ```` ``` ```` and a trailing
/// ```` ``` ````; surrounding whitespace is trimmed before and after.
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Parse a model reply as a JSON array of `T`.
///
/// Elements are decoded one at a time. An element that does not decode is
/// logged and replaced by `T::default()`, which validation then rejects, so
/// one odd object never discards the rest of the batch.
///
/// # Errors
///
/// Returns `GenerationError::Json` if the cleaned text is not a JSON array.
/// The cleaned text is logged before the error is returned.
pub fn parse_batch<T: DeserializeOwned + Default>(raw: &str) -> Result<Vec<T>, GenerationError> {
    let cleaned = strip_code_fence(raw);
    let elements: Vec<Value> = serde_json::from_str(cleaned).map_err(|e| {
        error!(error = %e, response = %cleaned, "Failed to parse Gemini response as JSON");
        GenerationError::Json(e)
    })?;

    Ok(elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value(element).unwrap_or_else(|e| {
                warn!(index, error = %e, "Unreadable record in Gemini response");
                T::default()
            })
        })
        .collect())
}

/// Deserialize a text field the model may send as a number, bool or `null`.
///
/// Numbers and bools keep their JSON spelling and `null` becomes empty, so
/// the value reaches validation instead of failing the element.
pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<String, D::Error> {
    struct LenientString;

    impl Visitor<'_> for LenientString {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, bool or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(LenientString)
}

/// Deserialize an optional user id given as a number or a numeric string.
///
/// Anything else, including negative numbers, is treated as absent.
pub(crate) fn lenient_user_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<UserId>, D::Error> {
    let id = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(id.map(UserId::new))
}
