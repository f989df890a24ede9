use std::collections::BTreeMap;

use serde_json::Value;

/// Message shown when a request failed without a usable error body.
pub const GENERIC_ERROR: &str = "Something went wrong.";

/// Structured error carried in `FetchState`.
///
/// Backends answer failed requests with either a scalar or a
/// field-keyed validation object; modelling both as one tagged variant
/// lets consuming code match exhaustively instead of probing shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetail {
    /// A single human-readable message.
    Message(String),
    /// One message per invalid field.
    Fields(BTreeMap<String, String>),
}

impl ErrorDetail {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    /// The fallback detail for failures with no decodable cause.
    pub fn generic() -> Self {
        Self::Message(GENERIC_ERROR.to_string())
    }

    /// Normalizes a decoded error body.
    ///
    /// Validation objects map each field to its message, taking the first
    /// element when the value is an array (`{field: [msg, ...]}` becomes
    /// `{field: msg}`). Scalars become a plain message.
    pub fn from_body(body: &Value) -> Self {
        match body {
            Value::Object(map) => Self::Fields(
                map.iter()
                    .map(|(field, value)| (field.clone(), first_message(value)))
                    .collect(),
            ),
            Value::String(text) => Self::Message(text.clone()),
            Value::Number(number) => Self::Message(number.to_string()),
            Value::Bool(flag) => Self::Message(flag.to_string()),
            Value::Array(items) => items.first().map(Self::from_body).unwrap_or_else(Self::generic),
            Value::Null => Self::generic(),
        }
    }

    /// The message for a single field, if this is a validation error.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            Self::Fields(fields) => fields.get(name).map(String::as_str),
            Self::Message(_) => None,
        }
    }

    /// The backend's `detail` message, used by call sites to recognize
    /// not-found responses (e.g. "No Article matches the given query").
    pub fn detail_message(&self) -> Option<&str> {
        self.field("detail")
    }
}

fn first_message(value: &Value) -> String {
    match value {
        Value::Array(items) => items.first().map(scalar_text).unwrap_or_default(),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
