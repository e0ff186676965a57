//! Prelude module for convenient imports.
//!
//! ```ignore
//! use courier::prelude::*;
//! ```

pub use crate::{
    BodyEncoding, ClientConfig, Error, ErrorKind, HttpClient, HyperTransport, Method, Payload,
    QueryMap, Reply, Request, Response, Result, StatusCode, Transport, Value,
};
pub use serde::{Deserialize, Serialize};
