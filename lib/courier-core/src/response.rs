//! HTTP response types.
//!
//! [`Response`] is the raw exchange result handed back by a transport.
//! [`Reply`] is what a successful call resolves to once the body is decoded.

use std::collections::HashMap;

use bytes::Bytes;

use crate::Payload;

// ============================================================================
// Raw Response
// ============================================================================

/// HTTP response with status, headers, and body, as read from the wire.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Creates a new response.
    ///
    /// Header names are lower-cased.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: Bytes) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HashMap<String, String>, Bytes) {
        (self.status, self.headers, self.body)
    }

    /// Returns `true` when [`crate::normalize`] turns this response into a
    /// [`Reply`]: the status is 2xx. Redirections and informational statuses
    /// are failures.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

// ============================================================================
// Successful Reply
// ============================================================================

/// Result of a successful (2xx) call.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    status: u16,
    data: Option<Payload>,
    headers: HashMap<String, String>,
}

impl Reply {
    /// Creates a new reply.
    #[must_use]
    pub fn new(status: u16, data: Option<Payload>, headers: HashMap<String, String>) -> Self {
        Self {
            status,
            data,
            headers,
        }
    }

    /// HTTP status code, always 2xx.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Decoded body, `None` when the remote sent nothing.
    #[must_use]
    pub const fn data(&self) -> Option<&Payload> {
        self.data.as_ref()
    }

    /// Response headers, names lower-cased.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Consume into the decoded body.
    #[must_use]
    pub fn into_data(self) -> Option<Payload> {
        self.data
    }

    /// Deserialize the decoded body into a typed value.
    ///
    /// An absent body is decoded as JSON `null`, so `Option<T>` targets accept it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonDeserialization`] if the body does not fit `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        match &self.data {
            Some(payload) => payload.decode(),
            None => Payload::Json(serde_json::Value::Null).decode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn response_basic() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let response = Response::new(200, headers, Bytes::from(r#"{"id":1}"#));

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert!(response.is_success());
    }

    #[test]
    fn only_2xx_is_success() {
        for status in [200, 201, 204, 299] {
            assert!(Response::new(status, HashMap::new(), Bytes::new()).is_success());
        }
        for status in [101, 199, 301, 304, 404, 500] {
            assert!(!Response::new(status, HashMap::new(), Bytes::new()).is_success());
        }
    }

    #[test]
    fn reply_json() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Echo {
            #[serde(rename = "reqMethod")]
            method: String,
        }

        let reply = Reply::new(
            200,
            Some(Payload::from_json(json!({"reqMethod": "GET", "reqPath": "/foo"}))),
            HashMap::new(),
        );
        let echo: Echo = reply.json().expect("deserialize");
        assert_eq!(
            echo,
            Echo {
                method: "GET".to_string()
            }
        );
    }

    #[test]
    fn reply_without_data() {
        let reply = Reply::new(204, None, HashMap::new());
        assert!(reply.data().is_none());
        let nothing: Option<String> = reply.json().expect("null");
        assert!(nothing.is_none());
        assert!(reply.json::<String>().is_err());
    }
}
