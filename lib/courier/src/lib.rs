//! Async HTTP client with a uniform request and response shape.
//!
//! Every verb takes a URL and optional object data, and settles into either a
//! [`Reply`] (2xx) or an [`Error`] carrying its [`ErrorKind`], the remote
//! status and the decoded payload when the server answered.
//!
//! # Example
//!
//! ```ignore
//! use courier::prelude::*;
//! use serde_json::json;
//!
//! let client = HttpClient::new();
//!
//! let reply = client.get("http://localhost:25000/foo/bar?awesome=true", None).await?;
//! println!("{:?}", reply.data());
//!
//! match client.get("http://localhost:25000/bar/hello/world", None).await {
//!     Ok(_) => unreachable!(),
//!     Err(err) => assert_eq!(err.status(), Some(404)),
//! }
//! ```

mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod transport;

// Re-export client types
pub use client::{HttpClient, HttpClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder, default_user_agent};
pub use transport::{BoxedService, HyperTransport, HyperTransportBuilder, ServiceFuture};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use courier_core::{
    BodyEncoding, ContentType, Error, ErrorKind, Method, Payload, QueryMap, QueryValue, Reply,
    Request, RequestBuilder, Response, Result, StatusCode, Transport, decode_payload, from_json,
    normalize, to_form, to_json,
};

pub use serde_json::Value;
pub use url;
