//! Core types for the courier HTTP client.
//!
//! This crate holds everything that does not need an async runtime:
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - validated request descriptors
//! - [`QueryMap`] - parsed query strings
//! - [`BodyEncoding`] and [`decode_payload`] - body encoding and decoding
//! - [`Payload`] - decoded bodies, text or structured
//! - [`Response`] and [`Reply`] - raw and normalized responses
//! - [`normalize`] - classification of raw responses
//! - [`Transport`] - the trait a network layer implements
//! - [`Error`], [`ErrorKind`] and [`Result`] - error handling
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)

mod body;
mod error;
mod method;
mod normalize;
mod payload;
pub mod prelude;
mod query;
mod request;
mod response;
mod transport;

pub use body::{BodyEncoding, ContentType, decode_payload, from_json, to_form, to_json};
pub use error::{Error, ErrorKind, Result};
pub use method::Method;
pub use normalize::normalize;
pub use payload::Payload;
pub use query::{QueryMap, QueryValue};
pub use request::{DEFAULT_ACCEPT, Request, RequestBuilder};
pub use response::{Reply, Response};
pub use transport::Transport;

// Re-export http crate types for status codes
pub use http::StatusCode;
