//! Transport trait.
//!
//! A [`Transport`] sends a [`Request`] and hands back the raw [`Response`].
//! It knows nothing about status classification: any answer from the remote
//! is an `Ok`, only failures to complete the exchange are errors.

use std::future::Future;

use crate::{Request, Response, Result};

/// Sends requests over the network.
///
/// Implement this trait to plug a different HTTP stack, or a fake one for
/// tests, under the client.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use bytes::Bytes;
/// use courier_core::{Request, Response, Result, Transport};
///
/// #[derive(Clone)]
/// struct Teapot;
///
/// impl Transport for Teapot {
///     async fn execute(&self, _request: Request) -> Result<Response> {
///         Ok(Response::new(418, HashMap::new(), Bytes::from("I'm a teapot")))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Execute an HTTP request and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the exchange could not complete:
    /// - [`crate::Error::Connection`] for network errors
    /// - [`crate::Error::Tls`] for TLS errors
    /// - [`crate::Error::Timeout`] when the exchange took too long
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

impl<T: Transport> Transport for &T {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).execute(request)
    }
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).execute(request)
    }
}
