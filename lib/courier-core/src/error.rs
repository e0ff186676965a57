//! Error types for courier.
//!
//! Every failed call yields an [`Error`]. Whatever its origin, the error can
//! be inspected through the same accessors: [`Error::status`] (only set when
//! the remote answered), [`Error::data`] (the decoded error payload) and its
//! `Display` message. [`Error::kind`] tells where the failure happened.

use derive_more::{Display, Error, From};

use crate::Payload;

// ============================================================================
// Error Kind
// ============================================================================

/// Where in the request pipeline an error originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// Bad local input, detected before any I/O.
    #[display("validation")]
    Validation,
    /// The exchange with the remote could not complete.
    #[display("transport")]
    Transport,
    /// The remote answered with a non-2xx status.
    #[display("remote")]
    Remote,
    /// A successful payload could not be decoded into the requested type.
    #[display("decode")]
    Decode,
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for courier operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Request data was supplied but is not a JSON object.
    #[display("invalid request data: {_0}")]
    #[from(skip)]
    InvalidData(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// HTTP-level errors (non-2xx status codes).
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Decoded response body, if the remote sent one.
        #[error(not(source))]
        data: Option<Payload>,
    },

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Lets infallible conversions, such as `Method` into itself, stand where a
/// fallible one is expected.
impl From<std::convert::Infallible> for Error {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

impl Error {
    /// Create an error for request data that is not an object.
    #[must_use]
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an HTTP error from status code and message.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            data: None,
        }
    }

    /// Create an HTTP error carrying the decoded error payload.
    #[must_use]
    pub fn http_with_data(status: u16, message: impl Into<String>, data: Payload) -> Self {
        Self::Http {
            status,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Where the error originated.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidData(_)
            | Self::InvalidUrl(_)
            | Self::InvalidRequest(_)
            | Self::JsonSerialization(_)
            | Self::FormSerialization(_) => ErrorKind::Validation,
            Self::Connection(_) | Self::Tls(_) | Self::Timeout => ErrorKind::Transport,
            Self::Http { .. } => ErrorKind::Remote,
            Self::JsonDeserialization { .. } => ErrorKind::Decode,
        }
    }

    /// Returns the HTTP status code if the remote answered.
    ///
    /// Always `None` for validation and transport errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the decoded error payload sent by the remote, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&Payload> {
        match self {
            Self::Http { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    /// Human readable description of the failure.
    ///
    /// For HTTP errors this is the message alone, without the status prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` if the error was detected before any I/O.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation)
    }

    /// Returns `true` if the exchange with the remote failed.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport)
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if this is a redirection (3xx).
    #[must_use]
    pub fn is_redirection(&self) -> bool {
        self.status().is_some_and(|s| (300..400).contains(&s))
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Try to decode the HTTP error payload into a typed value.
    ///
    /// Returns `None` if there is no payload or this is not an HTTP error.
    ///
    /// # Example
    ///
    /// ```ignore
    /// #[derive(Debug, Deserialize)]
    /// struct ApiError {
    ///     name: String,
    /// }
    ///
    /// if let Err(e) = client.get(url, None).await {
    ///     if let Some(Ok(api_error)) = e.decode_data::<ApiError>() {
    ///         println!("API error: {}", api_error.name);
    ///     }
    /// }
    /// ```
    pub fn decode_data<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.data().map(Payload::decode)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_display() {
        insta::assert_snapshot!(Error::http(404, "Not Found"), @"HTTP error 404: Not Found");
        insta::assert_snapshot!(Error::Timeout, @"request timeout");
        insta::assert_snapshot!(
            Error::connection("failed to connect"),
            @"connection error: failed to connect"
        );
        insta::assert_snapshot!(
            Error::invalid_data("expected an object, got a string"),
            @"invalid request data: expected an object, got a string"
        );
        insta::assert_snapshot!(
            Error::json_deserialization("user.address.city", "missing field `city`"),
            @"JSON deserialization error at 'user.address.city': missing field `city`"
        );
    }

    #[test]
    fn error_kind() {
        assert_eq!(Error::invalid_data("x").kind(), ErrorKind::Validation);
        assert_eq!(Error::invalid_request("x").kind(), ErrorKind::Validation);
        assert_eq!(
            Error::from(url::ParseError::RelativeUrlWithoutBase).kind(),
            ErrorKind::Validation
        );
        assert_eq!(Error::connection("x").kind(), ErrorKind::Transport);
        assert_eq!(Error::tls("x").kind(), ErrorKind::Transport);
        assert_eq!(Error::Timeout.kind(), ErrorKind::Transport);
        assert_eq!(Error::http(500, "x").kind(), ErrorKind::Remote);
        assert_eq!(
            Error::json_deserialization("a", "b").kind(),
            ErrorKind::Decode
        );
    }

    #[test]
    fn only_remote_errors_have_status() {
        assert_eq!(Error::http(404, "Not Found").status(), Some(404));
        assert_eq!(Error::invalid_data("x").status(), None);
        assert_eq!(Error::connection("refused").status(), None);
        assert_eq!(Error::Timeout.status(), None);
    }

    #[test]
    fn error_status_classes() {
        let err = Error::http(302, "Found");
        assert!(err.is_redirection());
        assert!(!err.is_client_error());

        let err = Error::http(404, "Not Found");
        assert!(err.is_client_error());
        assert!(err.is_not_found());
        assert!(!err.is_server_error());

        let err = Error::http(503, "Service Unavailable");
        assert!(err.is_server_error());
        assert!(!err.is_not_found());

        assert!(!Error::Timeout.is_client_error());
    }

    #[test]
    fn error_predicates() {
        assert!(Error::Timeout.is_timeout());
        assert!(Error::Timeout.is_transport());
        assert!(Error::connection("refused").is_connection());
        assert!(Error::invalid_data("x").is_validation());
        assert!(!Error::http(400, "Bad Request").is_validation());
    }

    #[test]
    fn error_message() {
        assert_eq!(Error::http(400, "Bad Request").message(), "Bad Request");
        assert_eq!(Error::Timeout.message(), "request timeout");
    }

    #[test]
    fn error_data() {
        assert!(Error::http(404, "Not Found").data().is_none());

        let err = Error::http_with_data(400, "Bad Request", Payload::from("Custom string error"));
        assert_eq!(err.data().and_then(Payload::as_text), Some("Custom string error"));

        assert!(Error::Timeout.data().is_none());
    }

    #[test]
    fn error_decode_data() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct ApiError {
            name: String,
        }

        let payload = Payload::from_json(json!({"name": "CustomError"}));
        let err = Error::http_with_data(400, "Bad Request", payload);

        let decoded = err.decode_data::<ApiError>();
        assert!(decoded.is_some());
        let result = decoded.expect("should have data");
        assert_eq!(
            result.expect("should decode"),
            ApiError {
                name: "CustomError".to_string()
            }
        );

        // No data
        let err = Error::http(404, "Not Found");
        assert!(err.decode_data::<ApiError>().is_none());

        // Non-HTTP error
        assert!(Error::Timeout.decode_data::<ApiError>().is_none());
    }
}
