//! Decoded request or response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The decoded body of a response.
///
/// Remote servers report errors either as a bare string or as a structured
/// object; both shapes are kept as sent. A JSON string body is represented as
/// [`Payload::Text`] so callers only have one place to look for text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// Plain text, or a JSON document that was a single string.
    Text(String),
    /// Any other JSON value, preserved verbatim.
    Json(Value),
}

impl Payload {
    /// Wrap a JSON value, folding JSON strings into [`Payload::Text`].
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Json(other),
        }
    }

    /// Text content, if this is a text payload.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Json(_) => None,
        }
    }

    /// JSON content, if this is a structured payload.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Field of a JSON object payload.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_json().and_then(|value| value.get(key))
    }

    /// Returns `true` for a JSON object payload.
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.as_json().is_some_and(Value::is_object)
    }

    /// Decode the payload into a typed value.
    ///
    /// Text payloads are decoded as a JSON string.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        let value = match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Json(value) => value.clone(),
        };
        serde_path_to_error::deserialize(value).map_err(|e| {
            crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
        })
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Json(value) => write!(f, "{value}"),
        }
    }
}
