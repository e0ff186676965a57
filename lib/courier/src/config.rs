//! Client configuration types.
//!
//! [`ClientConfig`] is immutable once built and shared by every call made
//! through a client.

use std::time::Duration;

use courier_core::BodyEncoding;

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout duration.
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
    /// Headers sent with every request.
    pub headers: Vec<(String, String)>,
    /// `User-Agent` header, omitted when `None`.
    pub user_agent: Option<String>,
    /// Wire encoding of request data.
    pub body_encoding: BodyEncoding,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            headers: Vec::new(),
            user_agent: Some(default_user_agent()),
            body_encoding: BodyEncoding::Json,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// `courier/<version>`.
#[must_use]
pub fn default_user_agent() -> String {
    format!("courier/{}", env!("CARGO_PKG_VERSION"))
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
    headers: Vec<(String, String)>,
    user_agent: Option<Option<String>>,
    body_encoding: Option<BodyEncoding>,
}

impl ClientConfigBuilder {
    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(Some(user_agent.into()));
        self
    }

    /// Do not send a `User-Agent` header.
    #[must_use]
    pub fn without_user_agent(mut self) -> Self {
        self.user_agent = Some(None);
        self
    }

    /// Set the wire encoding of request data.
    #[must_use]
    pub const fn body_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.body_encoding = Some(encoding);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
            headers: self.headers,
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            body_encoding: self.body_encoding.unwrap_or(defaults.body_encoding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.pool_idle_per_host, 32);
        assert!(config.headers.is_empty());
        assert_eq!(config.body_encoding, BodyEncoding::Json);
        assert!(
            config
                .user_agent
                .as_deref()
                .is_some_and(|ua| ua.starts_with("courier/"))
        );
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .pool_idle_per_host(16)
            .header("X-Api-Key", "secret")
            .user_agent("my-app/1.0")
            .body_encoding(BodyEncoding::Form)
            .build();

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.pool_idle_per_host, 16);
        assert_eq!(
            config.headers,
            vec![("X-Api-Key".to_string(), "secret".to_string())]
        );
        assert_eq!(config.user_agent.as_deref(), Some("my-app/1.0"));
        assert_eq!(config.body_encoding, BodyEncoding::Form);
    }

    #[test]
    fn builder_without_user_agent() {
        let config = ClientConfig::builder().without_user_agent().build();
        assert!(config.user_agent.is_none());
    }
}
