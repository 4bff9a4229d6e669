//! Field rules shared by the category and genre payloads.
//!
//! Payload fields are kept as raw `serde_json::Value` so that a wrongly typed
//! value (`"is_active": "a"`) reaches validation and is reported per field,
//! instead of failing JSON deserialization for the whole body.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::ValidationError;

use crate::shared::constants::{
    MSG_DESCRIPTION_STRING, MSG_IS_ACTIVE_BOOLEAN, MSG_NAME_MAX, MSG_NAME_REQUIRED,
    MSG_NAME_STRING, NAME_MAX_LENGTH,
};

pub const CODE_REQUIRED: &str = "required";
pub const CODE_STRING: &str = "string";
pub const CODE_MAX_LENGTH: &str = "max_length";
pub const CODE_BOOLEAN: &str = "boolean";

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Deserialize a field so that an explicit `null` stays distinguishable from
/// an absent key: absent -> `None` (via `#[serde(default)]`), null ->
/// `Some(Value::Null)`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Interpret a JSON value the way form input booleans are accepted:
/// `true`, `false`, `1`, `0`, `"1"`, `"0"`. Anything else, null included, is
/// not a boolean.
pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "1" => Some(true),
            "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Trimmed string content, `None` when blank
fn trimmed(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

pub fn validate_name(value: &Value) -> Result<(), ValidationError> {
    let Value::String(name) = value else {
        return Err(rule_error(CODE_STRING, MSG_NAME_STRING));
    };

    let Some(name) = trimmed(name) else {
        return Err(rule_error(CODE_REQUIRED, MSG_NAME_REQUIRED));
    };

    if name.chars().count() > NAME_MAX_LENGTH {
        let mut error = rule_error(CODE_MAX_LENGTH, MSG_NAME_MAX);
        error.add_param(Cow::Borrowed("max"), &NAME_MAX_LENGTH);
        return Err(error);
    }

    Ok(())
}

pub fn validate_is_active(value: &Value) -> Result<(), ValidationError> {
    match coerce_bool(value) {
        Some(_) => Ok(()),
        None => Err(rule_error(CODE_BOOLEAN, MSG_IS_ACTIVE_BOOLEAN)),
    }
}

pub fn validate_description(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Null | Value::String(_) => Ok(()),
        _ => Err(rule_error(CODE_STRING, MSG_DESCRIPTION_STRING)),
    }
}

/// Name after a successful `validate_name`
pub fn normalize_name(value: &Value) -> String {
    value.as_str().map(str::trim).unwrap_or_default().to_string()
}

/// Description after a successful `validate_description`; blank becomes null
pub fn normalize_description(value: &Value) -> Option<String> {
    value.as_str().and_then(trimmed).map(str::to_string)
}
