//! Body serialization utilities.
//!
//! Request data is always a JSON object. It is written on the wire with one
//! of the [`BodyEncoding`]s, and response bodies are decoded into a
//! [`Payload`] without ever failing.

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::{Error, Payload, Result};

/// Content type written for request data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }

    /// Returns `true` if a `Content-Type` header value denotes JSON.
    ///
    /// Matches `application/json` as well as `+json` suffixes such as
    /// `application/problem+json`, ignoring parameters.
    #[must_use]
    pub fn is_json(header: &str) -> bool {
        let essence = header
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        essence == "application/json" || essence.ends_with("+json")
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Wire encoding used for request data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BodyEncoding {
    /// `application/json`.
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`.
    ///
    /// Only flat objects can be encoded: scalar values and arrays of scalars
    /// (written as repeated keys).
    Form,
}

impl BodyEncoding {
    /// Content type written with this encoding.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        match self {
            Self::Json => ContentType::Json,
            Self::Form => ContentType::FormUrlEncoded,
        }
    }

    /// Encode request data.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the data cannot be represented with this
    /// encoding.
    pub fn encode(&self, data: &Map<String, Value>) -> Result<Bytes> {
        match self {
            Self::Json => to_json(data),
            Self::Form => to_form(&form_pairs(data)?),
        }
    }
}

/// Flatten an object into form pairs.
fn form_pairs(data: &Map<String, Value>) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::with_capacity(data.len());
    for (key, value) in data {
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), form_scalar(key, item)?));
                }
            }
            other => pairs.push((key.clone(), form_scalar(key, other)?)),
        }
    }
    Ok(pairs)
}

fn form_scalar(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text.clone()),
        Value::Bool(_) | Value::Number(_) => Ok(value.to_string()),
        Value::Array(_) | Value::Object(_) => Err(Error::invalid_data(format!(
            "field `{key}` is nested and cannot be form-encoded"
        ))),
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use courier_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Band { name: String }
///
/// let band = Band { name: "Foo Fighters".to_string() };
/// let bytes = to_json(&band).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Foo Fighters"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to form URL-encoded bytes.
///
/// Uses `serde_html_form` which supports `Vec<T>` for repeated form fields
/// (e.g., `tags=a&tags=b&tags=c`).
///
/// # Errors
///
/// Returns an error if form serialization fails.
///
/// # Example
///
/// ```
/// use courier_core::to_form;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Login { username: String, password: String }
///
/// let login = Login { username: "alice".to_string(), password: "secret".to_string() };
/// let bytes = to_form(&login).expect("serialize");
/// assert_eq!(bytes.as_ref(), b"username=alice&password=secret");
/// ```
pub fn to_form<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_html_form::to_string(value)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` to provide detailed error messages that include
/// the exact path to the field that failed to deserialize.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "user.address.city").
///
/// # Example
///
/// ```
/// use courier_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Echo {
///     #[serde(rename = "reqMethod")]
///     method: String,
/// }
///
/// let bytes = br#"{"reqMethod":"GET"}"#;
/// let echo: Echo = from_json(bytes).expect("deserialize");
/// assert_eq!(echo.method, "GET");
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Decode a response body into a [`Payload`].
///
/// - an empty body yields `None`;
/// - a JSON content type is parsed, falling back to text when malformed;
/// - without a content type, JSON is attempted, then text;
/// - any other content type yields text (invalid UTF-8 is replaced).
#[must_use]
pub fn decode_payload(content_type: Option<&str>, body: &[u8]) -> Option<Payload> {
    if body.is_empty() {
        return None;
    }

    if content_type.is_none_or(ContentType::is_json)
        && let Ok(value) = serde_json::from_slice::<Value>(body)
    {
        return Some(Payload::from_json(value));
    }

    Some(Payload::Text(String::from_utf8_lossy(body).into_owned()))
}
