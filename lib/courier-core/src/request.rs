//! HTTP request building.
//!
//! A [`Request`] is the fully-specified, immutable description of one outgoing
//! call. Use [`Request::builder`] (or the one-shot [`Request::build`]) to
//! validate inputs and construct it.
//!
//! # Example
//!
//! ```
//! use courier_core::{Method, Request};
//! use serde_json::json;
//!
//! let request = Request::builder(Method::Post, "http://localhost:25000/foo/bar?awesome=true")
//!     .expect("valid URL")
//!     .header("X-Request-Id", "42")
//!     .data(&json!({"foo": "fighters"}))
//!     .expect("object data")
//!     .build()
//!     .expect("valid request");
//!
//! assert_eq!(request.path(), "/foo/bar");
//! assert_eq!(request.header("content-type"), Some("application/json"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::{Map, Value};
use url::Url;

use crate::{BodyEncoding, Error, Method, QueryMap, Result};

/// Default `Accept` header sent when none is configured.
pub const DEFAULT_ACCEPT: &str = "application/json, text/plain, */*";

/// An HTTP request with method, URL, headers, and optional body.
///
/// Header names are stored lower-cased.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    query: QueryMap,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a new [`RequestBuilder`] from a URL string.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute `http`/`https` URL.
    pub fn builder(method: Method, url: &str) -> Result<RequestBuilder> {
        RequestBuilder::parse(method, url)
    }

    /// Validate inputs and build a request in one step.
    ///
    /// `data`, when present, must be a JSON object. It is only sent as a body
    /// for methods that carry one.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad URL or non-object data.
    pub fn build(
        url: &str,
        method: Method,
        data: Option<&Value>,
        encoding: BodyEncoding,
    ) -> Result<Self> {
        let mut builder = RequestBuilder::parse(method, url)?.encoding(encoding);
        if let Some(data) = data {
            builder = builder.data(data)?;
        }
        builder.build()
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL, query string included.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// URL path without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Parsed query string.
    #[must_use]
    pub fn query(&self) -> &QueryMap {
        &self.query
    }

    /// Request headers.
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

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, HashMap<String, String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Url,
    headers: HashMap<String, String>,
    data: Option<Map<String, Value>>,
    encoding: BodyEncoding,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            data: None,
            encoding: BodyEncoding::default(),
        }
    }

    /// Creates a new builder from a URL string.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed, is relative, or does not
    /// use the `http` or `https` scheme.
    pub fn parse(method: Method, url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_request(format!(
                "unsupported URL scheme: {}",
                url.scheme()
            )));
        }
        if url.host().is_none() {
            return Err(Error::InvalidUrl(url::ParseError::EmptyHost));
        }
        Ok(Self::new(method, url))
    }

    /// Sets a header, replacing any previous value.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self = self.header(name, value);
        }
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Sets the wire encoding of the request data.
    #[must_use]
    pub const fn encoding(mut self, encoding: BodyEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the request data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] unless `data` is a JSON object.
    pub fn data(mut self, data: &Value) -> Result<Self> {
        match data {
            Value::Object(map) => {
                self.data = Some(map.clone());
                Ok(self)
            }
            other => Err(Error::invalid_data(format!(
                "expected an object, got {}",
                describe(other)
            ))),
        }
    }

    /// Sets the request data from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the value is not an object.
    pub fn json<T: serde::Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let data = serde_json::to_value(value)?;
        self.data(&data)
    }

    /// Builds the [`Request`].
    ///
    /// The query string is parsed and re-encoded in its original order, so the
    /// URL text may change: `?q=a%20b&x` becomes `?q=a+b&x=` and a bare `?` is
    /// dropped. An `Accept` header is added when missing, and the data is
    /// serialized when the method carries a body.
    ///
    /// # Errors
    ///
    /// Returns an error if a header is invalid or the data cannot be encoded.
    pub fn build(self) -> Result<Request> {
        let Self {
            method,
            mut url,
            mut headers,
            data,
            encoding,
        } = self;

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        url.set_query(None);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(&pairs);
        }
        let query = pairs.into_iter().collect();

        headers
            .entry("accept".to_string())
            .or_insert_with(|| DEFAULT_ACCEPT.to_string());

        let body = match data {
            Some(data) if method.carries_body() => {
                let body = encoding.encode(&data)?;
                headers.insert(
                    "content-type".to_string(),
                    encoding.content_type().to_string(),
                );
                headers.insert("content-length".to_string(), body.len().to_string());
                Some(body)
            }
            _ => {
                headers.remove("content-type");
                headers.remove("content-length");
                None
            }
        };

        for (name, value) in &headers {
            validate_header(name, value)?;
        }

        Ok(Request {
            method,
            url,
            query,
            headers,
            body,
        })
    }
}

fn validate_header(name: &str, value: &str) -> Result<()> {
    http::HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::invalid_request(format!("invalid header name {name:?}: {e}")))?;
    http::HeaderValue::from_str(value)
        .map_err(|e| Error::invalid_request(format!("invalid value for header {name}: {e}")))?;
    Ok(())
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
