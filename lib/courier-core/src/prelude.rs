//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use courier_core::prelude::*;
//! ```

pub use crate::{
    BodyEncoding, ContentType, Error, ErrorKind, Method, Payload, QueryMap, QueryValue, Reply,
    Request, RequestBuilder, Response, Result, Transport, normalize,
};
