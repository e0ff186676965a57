//! Tower middleware layers for the courier transport.
//!
//! Layers wrap the raw hyper transport and see every [`crate::Request`] before
//! it is sent and every raw [`crate::Response`] before it is normalized.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs each exchange and its [`Outcome`] using `tracing`
//!
//! Any other Tower layer whose service speaks `Request`/`Response`/`Error`
//! can be added with [`crate::HyperTransportBuilder::layer`].
//!
//! # Example
//!
//! ```ignore
//! use courier::HttpClient;
//! use courier::middleware::LoggingLayer;
//!
//! let client = HttpClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{Logging, LoggingLayer, Outcome, Verbosity};

// Re-export tower building blocks for custom stacks
pub use tower::{Layer, Service, ServiceBuilder};
