//! The HTTP client facade.
//!
//! [`HttpClient`] exposes one method per verb plus the generic
//! [`HttpClient::request`]. Each call goes through the same pipeline:
//!
//! 1. build and validate the [`Request`] (no I/O, fails without a status),
//! 2. send it through the [`Transport`] (fails without a status),
//! 3. [`normalize`] the raw response (2xx succeeds, anything else fails with
//!    the remote status and payload).
//!
//! No retries are attempted and every call settles exactly once.

use std::sync::Arc;

use courier_core::{Transport, normalize};
use serde_json::Value;
use tower::Layer;
use tower_service::Service;
use tracing::{debug, warn};

use crate::transport::{BoxedService, HyperTransportBuilder};
use crate::{
    ClientConfig, ClientConfigBuilder, Error, HyperTransport, Method, Reply, Request, Response,
    Result,
};

/// HTTP client with a uniform result shape for every verb.
///
/// The client only holds immutable configuration and a cloneable transport,
/// so it can be cloned and shared freely; concurrent calls are independent.
///
/// # Example
///
/// ```ignore
/// use courier::HttpClient;
/// use serde_json::json;
///
/// let client = HttpClient::new();
///
/// let reply = client.get("http://localhost:25000/foo/bar?awesome=true", None).await?;
/// assert_eq!(reply.status(), 200);
///
/// let band = json!({"awesome": "band", "foo": "fighters", "is": "an"});
/// let reply = client.post("http://localhost:25000/foo/bar", Some(&band)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient<T = HyperTransport> {
    transport: T,
    config: Arc<ClientConfig>,
}

impl HttpClient<HyperTransport> {
    /// Create a new client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration (no middleware).
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let transport = HyperTransport::with_config(config.clone());
        Self::with_transport(transport, config)
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }
}

impl Default for HttpClient<HyperTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> HttpClient<T> {
    /// Create a client over any transport.
    #[must_use]
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    /// Get the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Build and validate the request for a call, without sending it.
    ///
    /// The configured `User-Agent` is applied first, so a `User-Agent` among
    /// the configured headers takes precedence. Then `data` is checked: it
    /// must be a JSON object when present.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad URL, a bad header or non-object data.
    pub fn prepare(&self, url: &str, method: Method, data: Option<&Value>) -> Result<Request> {
        let mut builder = Request::builder(method, url)?.encoding(self.config.body_encoding);

        if let Some(user_agent) = &self.config.user_agent {
            builder = builder.header("user-agent", user_agent.as_str());
        }
        builder = builder.headers(
            self.config
                .headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );
        if let Some(data) = data {
            builder = builder.data(data)?;
        }

        builder.build()
    }

    /// Send a prepared request and normalize the response.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the exchange fails, or an HTTP error with
    /// the remote status for any non-2xx response.
    pub async fn send(&self, request: Request) -> Result<Reply> {
        let method = request.method();
        let result = match self.transport.execute(request).await {
            Ok(response) => normalize(method, response),
            Err(err) => Err(err),
        };
        log_outcome(method, &result);
        result
    }

    /// Issue a request with any method.
    ///
    /// The method is either a [`Method`] or its name (`"get"`, `"PATCH"`,
    /// ...); an unknown name fails like any other invalid input.
    ///
    /// `data` must be a JSON object when present. It is sent as the body for
    /// POST, PUT and PATCH, and ignored by the other methods.
    ///
    /// # Errors
    ///
    /// - a validation error, before any I/O, for bad input (no status);
    /// - a transport error when the exchange fails (no status);
    /// - an HTTP error with the remote status and payload for non-2xx answers.
    pub async fn request<M>(&self, url: &str, method: M, data: Option<&Value>) -> Result<Reply>
    where
        M: TryInto<Method>,
        Error: From<M::Error>,
    {
        let prepared = method
            .try_into()
            .map_err(Error::from)
            .and_then(|method| self.prepare(url, method, data));
        let request = match prepared {
            Ok(request) => request,
            Err(err) => {
                warn!(url, kind = %err.kind(), error = %err, "invalid request");
                return Err(err);
            }
        };
        let method = request.method();
        debug!(%method, url = %request.url(), "request built");
        self.send(request).await
    }

    /// Issue a GET request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get(&self, url: &str, data: Option<&Value>) -> Result<Reply> {
        self.request(url, Method::Get, data).await
    }

    /// Issue a HEAD request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn head(&self, url: &str, data: Option<&Value>) -> Result<Reply> {
        self.request(url, Method::Head, data).await
    }

    /// Issue an OPTIONS request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn options(&self, url: &str, data: Option<&Value>) -> Result<Reply> {
        self.request(url, Method::Options, data).await
    }

    /// Issue a TRACE request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn trace(&self, url: &str, data: Option<&Value>) -> Result<Reply> {
        self.request(url, Method::Trace, data).await
    }

    /// Issue a POST request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn post(&self, url: &str, data: Option<&Value>) -> Result<Reply> {
        self.request(url, Method::Post, data).await
    }

    /// Issue a PUT request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn put(&self, url: &str, data: Option<&Value>) -> Result<Reply> {
        self.request(url, Method::Put, data).await
    }

    /// Issue a PATCH request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn patch(&self, url: &str, data: Option<&Value>) -> Result<Reply> {
        self.request(url, Method::Patch, data).await
    }

    /// Issue a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete(&self, url: &str, data: Option<&Value>) -> Result<Reply> {
        self.request(url, Method::Delete, data).await
    }
}

fn log_outcome(method: Method, result: &Result<Reply>) {
    match result {
        Ok(reply) => debug!(%method, status = reply.status(), "request succeeded"),
        Err(err) => warn!(
            %method,
            kind = %err.kind(),
            status = ?err.status(),
            error = %err,
            "request failed"
        ),
    }
}

/// Builder for an [`HttpClient`] over the hyper transport.
///
/// # Example
///
/// ```ignore
/// use courier::{BodyEncoding, HttpClient};
/// use std::time::Duration;
///
/// let client = HttpClient::builder()
///     .timeout(Duration::from_secs(5))
///     .header("X-Api-Key", "secret")
///     .body_encoding(BodyEncoding::Form)
///     .with_logging()
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpClientBuilder {
    config: ClientConfigBuilder,
    transport: HyperTransportBuilder,
}

impl HttpClientBuilder {
    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config = self.config.header(name, value);
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.user_agent(user_agent);
        self
    }

    /// Set the wire encoding of request data.
    #[must_use]
    pub fn body_encoding(mut self, encoding: courier_core::BodyEncoding) -> Self {
        self.config = self.config.body_encoding(encoding);
        self
    }

    /// Add a Tower layer around the transport.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service:
            Service<Request, Response = Response, Error = Error> + Clone + Send + 'static,
        <L::Service as Service<Request>>::Future: Send,
    {
        self.transport = self.transport.layer(layer);
        self
    }

    /// Add request/response logging.
    #[must_use]
    pub fn with_logging(mut self) -> Self {
        self.transport = self.transport.with_logging();
        self
    }

    /// Add debug-level logging (includes headers).
    #[must_use]
    pub fn with_debug_logging(mut self) -> Self {
        self.transport = self.transport.with_debug_logging();
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> HttpClient<HyperTransport> {
        let config = self.config.build();
        let transport = self.transport.config(config.clone()).build();
        HttpClient::with_transport(transport, config)
    }
}
