//! Exchange logging middleware.
//!
//! Every exchange runs inside a `courier.exchange` span carrying the method,
//! host and path. The query string is left out of the span since it often
//! carries credentials. When the exchange completes, one event reports its
//! [`Outcome`], using the same rule as [`courier_core::normalize`]: only 2xx
//! answers are accepted, and redirections count as rejections.

use std::task::{Context, Poll};
use std::time::Instant;

use courier_core::ErrorKind;
use tower::{Layer, Service};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::{Error, Request, Response, Result, ServiceFuture};

/// How much of each exchange is logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// One `info` event per completed exchange.
    #[default]
    Summary,
    /// Also `debug` events with the request and response headers and body sizes.
    Headers,
}

/// Layer that logs every exchange going through the transport.
///
/// # Example
///
/// ```ignore
/// use courier::HttpClient;
/// use courier::middleware::LoggingLayer;
///
/// let client = HttpClient::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    verbosity: Verbosity,
}

impl LoggingLayer {
    /// Log a summary of each exchange.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log headers and body sizes as well.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            verbosity: Verbosity::Headers,
        }
    }

    /// Configured verbosity.
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            verbosity: self.verbosity,
        }
    }
}

/// How an exchange ended, as the client will report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx: the call resolves with a reply.
    Accepted(u16),
    /// The remote answered with any other status: the call fails with
    /// [`ErrorKind::Remote`].
    Rejected(u16),
    /// No answer: the call fails with this kind of error.
    Failed(ErrorKind),
}

impl Outcome {
    /// Classify the result of an exchange.
    #[must_use]
    pub fn of(result: &Result<Response>) -> Self {
        match result {
            Ok(response) if response.is_success() => Self::Accepted(response.status()),
            Ok(response) => Self::Rejected(response.status()),
            Err(err) => Self::Failed(err.kind()),
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    verbosity: Verbosity,
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let span = info_span!(
            "courier.exchange",
            method = %request.method(),
            host = request.url().host_str().unwrap_or_default(),
            path = request.path(),
        );
        if self.verbosity == Verbosity::Headers {
            span.in_scope(|| {
                debug!(
                    headers = ?request.headers(),
                    query_params = request.query().len(),
                    body_len = request.body().map_or(0, |body| body.len()),
                    "request"
                );
            });
        }

        let verbosity = self.verbosity;
        let mut inner = self.inner.clone();
        let exchange = async move {
            let start = Instant::now();
            let result = inner.call(request).await;
            let elapsed = start.elapsed();

            match Outcome::of(&result) {
                Outcome::Accepted(status) => info!(status, ?elapsed, "accepted"),
                Outcome::Rejected(status) => {
                    warn!(status, kind = %ErrorKind::Remote, ?elapsed, "rejected");
                }
                Outcome::Failed(kind) => {
                    if let Err(err) = &result {
                        warn!(%kind, error = %err, ?elapsed, "failed");
                    }
                }
            }
            if verbosity == Verbosity::Headers
                && let Ok(response) = &result
            {
                debug!(
                    headers = ?response.headers(),
                    body_len = response.body().len(),
                    "response"
                );
            }

            result
        };
        Box::pin(exchange.instrument(span))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bytes::Bytes;
    use courier_core::Method;
    use tower::ServiceExt;

    use super::*;

    fn request(path: &str) -> Request {
        Request::builder(Method::Get, &format!("http://localhost{path}"))
            .expect("url")
            .build()
            .expect("request")
    }

    fn answer(status: u16) -> Result<Response> {
        Ok(Response::new(status, HashMap::new(), Bytes::new()))
    }

    #[test]
    fn layer_verbosity() {
        assert_eq!(LoggingLayer::new().verbosity(), Verbosity::Summary);
        assert_eq!(LoggingLayer::debug().verbosity(), Verbosity::Headers);
    }

    #[test]
    fn outcome_follows_normalization() {
        assert_eq!(Outcome::of(&answer(200)), Outcome::Accepted(200));
        assert_eq!(Outcome::of(&answer(204)), Outcome::Accepted(204));
        assert_eq!(Outcome::of(&answer(302)), Outcome::Rejected(302));
        assert_eq!(Outcome::of(&answer(101)), Outcome::Rejected(101));
        assert_eq!(Outcome::of(&answer(404)), Outcome::Rejected(404));
        assert_eq!(
            Outcome::of(&Err(Error::Timeout)),
            Outcome::Failed(ErrorKind::Transport)
        );
    }

    #[tokio::test]
    async fn responses_pass_through() {
        let inner = tower::service_fn(|request: Request| async move {
            Ok::<_, Error>(Response::new(
                200,
                HashMap::new(),
                Bytes::from(request.path().to_string()),
            ))
        });
        let service = LoggingLayer::debug().layer(inner);

        let response = service.oneshot(request("/logged")).await.expect("response");

        assert_eq!(response.status(), 200);
        assert_eq!(response.body().as_ref(), b"/logged");
    }

    #[tokio::test]
    async fn errors_pass_through() {
        let inner =
            tower::service_fn(|_request: Request| async { Err::<Response, _>(Error::Timeout) });
        let service = LoggingLayer::new().layer(inner);

        let err = service.oneshot(request("/slow")).await.expect_err("timeout");

        assert!(err.is_timeout());
    }
}
