//! Client builder
//!
//! The `ClientBuilder` collects everything a [`TransmissionClient`] needs
//! before it is built:
//! - the RPC endpoint and the Basic credentials
//! - HTTP timeouts and user agent
//! - an optional session id to start with
//! - optional OpenTelemetry setup and metrics
//!
//! # Examples
//!
//! ```rust,no_run
//! use transmission_rpc_client::ClientBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> transmission_rpc_core::Result<()> {
//! let client = ClientBuilder::new("http://nas.local:9091/transmission/rpc")
//!     .credentials("admin", "admin")
//!     .timeout(Duration::from_secs(5))
//!     .build()?;
//!
//! // Same thing, configured from TRANSMISSION_* environment variables
//! let from_env = ClientBuilder::from_env()?.build()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! [`ClientBuilder::from_env`] reads:
//! - `TRANSMISSION_URL`
//! - `TRANSMISSION_USERNAME`
//! - `TRANSMISSION_PASSWORD`
//! - `TRANSMISSION_TIMEOUT_MS` (applies to both connect and request timeouts)

use crate::client::ClientInner;
use crate::{ClientMetrics, Credentials, SessionState, TransmissionClient};
use reqwest::header::HeaderValue;
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;
use transmission_rpc_core::{Error, ObservabilityConfig, Result, SessionToken};

/// Endpoint of a daemon running on the local machine with default settings
pub const DEFAULT_URL: &str = "http://127.0.0.1:9091/transmission/rpc";

/// Default connect and request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Builder for configuring and creating a TransmissionClient
#[derive(Debug)]
pub struct ClientBuilder {
    url: String,
    credentials: Credentials,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: Option<String>,
    session_token: Option<SessionToken>,
    observability_config: Option<ObservabilityConfig>,
    service_name: Option<String>,
    enable_metrics: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

impl ClientBuilder {
    /// Create a new client builder for an endpoint
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credentials: Credentials::default(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            session_token: None,
            observability_config: None,
            service_name: None,
            enable_metrics: false,
        }
    }

    /// Create a builder from `TRANSMISSION_*` environment variables
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `TRANSMISSION_TIMEOUT_MS` is not a
    /// number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup("TRANSMISSION_URL").unwrap_or_else(|| DEFAULT_URL.to_string());
        let mut builder = Self::new(url);

        let username = lookup("TRANSMISSION_USERNAME").unwrap_or_default();
        let password = lookup("TRANSMISSION_PASSWORD").unwrap_or_default();
        builder.credentials = Credentials::new(username, password);

        if let Some(raw) = lookup("TRANSMISSION_TIMEOUT_MS") {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                Error::InvalidConfig(format!("TRANSMISSION_TIMEOUT_MS is not a number: {raw}"))
            })?;
            builder = builder
                .timeout(Duration::from_millis(millis))
                .connect_timeout(Duration::from_millis(millis));
        }

        Ok(builder)
    }

    /// Set the RPC endpoint
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set username and password
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Credentials::new(username, password);
        self
    }

    /// Set the username, keeping the password
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.credentials = Credentials::new(username, self.credentials.password());
        self
    }

    /// Set the password, keeping the username
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.credentials = Credentials::new(self.credentials.username(), password);
        self
    }

    /// Set the overall request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the TCP connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the `User-Agent` header
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Start with a known session id instead of learning it from a 409
    pub fn with_session_token(mut self, token: impl Into<SessionToken>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Initialize OpenTelemetry with a custom configuration and record metrics
    pub fn with_observability(mut self, config: ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self.enable_metrics = true;
        self
    }

    /// Initialize OpenTelemetry with the default configuration and record metrics
    pub fn with_default_observability(self) -> Self {
        self.with_observability(ObservabilityConfig::default())
    }

    /// Record metrics on the global meter provider without initializing it
    ///
    /// For applications that set up OpenTelemetry themselves.
    pub fn with_metrics(mut self) -> Self {
        self.enable_metrics = true;
        self
    }

    /// Set service name for observability
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build the client
    ///
    /// No request is sent; the session id is acquired on the first call.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for an unparsable or non-HTTP URL, a
    /// zero timeout, credentials or a session id that cannot be sent as a
    /// header, or an HTTP client or observability setup failure.
    pub fn build(self) -> Result<TransmissionClient> {
        let endpoint = Url::parse(&self.url)
            .map_err(|e| Error::InvalidConfig(format!("invalid url '{}': {}", self.url, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "unsupported url scheme '{}'",
                endpoint.scheme()
            )));
        }
        if self.timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err(Error::InvalidConfig("timeouts must be non-zero".to_string()));
        }

        let auth_header = self.credentials.header_value()?;

        if let Some(ref token) = self.session_token {
            HeaderValue::from_str(token.as_str())
                .map_err(|e| Error::InvalidConfig(format!("session id: {}", e)))?;
        }

        let service_name = self
            .service_name
            .clone()
            .unwrap_or_else(|| "transmission-rpc".to_string());

        if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }
            transmission_rpc_core::init_observability(config).map_err(|e| {
                Error::InvalidConfig(format!("Failed to initialize observability: {}", e))
            })?;
        }

        let metrics = self
            .enable_metrics
            .then(|| ClientMetrics::new(service_name));

        let mut http = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .no_proxy();
        if let Some(agent) = self.user_agent {
            http = http.user_agent(agent);
        }
        let http = http
            .build()
            .map_err(|e| Error::InvalidConfig(format!("http client: {}", e)))?;

        let session = match self.session_token {
            Some(token) => SessionState::with_token(token),
            None => SessionState::new(),
        };

        tracing::info!(
            url = %endpoint,
            username = %self.credentials.username(),
            "Transmission client built"
        );

        Ok(TransmissionClient {
            inner: Arc::new(ClientInner {
                http,
                endpoint,
                credentials: self.credentials,
                auth_header,
                session,
                metrics,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_builder_defaults() {
        let builder = ClientBuilder::default();

        assert_eq!(builder.url, DEFAULT_URL);
        assert_eq!(builder.credentials, Credentials::default());
        assert_eq!(builder.timeout, DEFAULT_TIMEOUT);
        assert_eq!(builder.connect_timeout, DEFAULT_TIMEOUT);
        assert!(builder.session_token.is_none());
        assert!(builder.observability_config.is_none());
        assert!(!builder.enable_metrics);
    }

    #[test]
    fn test_builder_chaining() {
        let builder = ClientBuilder::new("http://host/rpc")
            .credentials("admin", "admin")
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(1))
            .user_agent("torrent-sync/1.0")
            .with_session_token("abc123")
            .service_name("torrent-sync")
            .with_metrics();

        assert_eq!(builder.url, "http://host/rpc");
        assert_eq!(builder.credentials.username(), "admin");
        assert_eq!(builder.timeout, Duration::from_secs(5));
        assert_eq!(builder.connect_timeout, Duration::from_secs(1));
        assert_eq!(builder.user_agent.as_deref(), Some("torrent-sync/1.0"));
        assert_eq!(builder.session_token, Some(SessionToken::from("abc123")));
        assert_eq!(builder.service_name.as_deref(), Some("torrent-sync"));
        assert!(builder.enable_metrics);
    }

    #[test]
    fn test_username_and_password_set_separately() {
        let builder = ClientBuilder::new("http://host/rpc")
            .password("secret")
            .username("admin");

        assert_eq!(builder.credentials, Credentials::new("admin", "secret"));
    }

    #[test]
    fn test_builder_observability_enables_metrics() {
        let config = ObservabilityConfig::new("test-client").with_log_level("debug");
        let builder = ClientBuilder::new("http://host/rpc").with_observability(config);

        assert!(builder.enable_metrics);
        let obs_config = builder.observability_config.unwrap();
        assert_eq!(obs_config.service_name, "test-client");
        assert_eq!(obs_config.log_level, "debug");
    }

    #[test]
    fn test_builder_default_observability() {
        let builder = ClientBuilder::new("http://host/rpc").with_default_observability();
        let obs_config = builder.observability_config.unwrap();
        assert_eq!(obs_config.service_name, "transmission-rpc");
    }

    #[tokio::test]
    async fn test_build_seeds_session_token() {
        let client = ClientBuilder::new("http://host/rpc")
            .with_session_token("abc123")
            .build()
            .unwrap();

        assert_eq!(client.session_token().await, Some(SessionToken::from("abc123")));
        assert_eq!(client.endpoint().as_str(), "http://host/rpc");
    }

    #[test]
    fn test_build_rejects_invalid_url() {
        let result = ClientBuilder::new("not a url").build();
        match result {
            Err(Error::InvalidConfig(msg)) => assert!(msg.contains("not a url")),
            other => panic!("Expected InvalidConfig, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_build_rejects_non_http_scheme() {
        let result = ClientBuilder::new("ftp://host/rpc").build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_build_rejects_zero_timeout() {
        let result = ClientBuilder::new("http://host/rpc")
            .timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_build_rejects_unsendable_session_token() {
        let result = ClientBuilder::new("http://host/rpc")
            .with_session_token("bad\ntoken")
            .build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let builder = ClientBuilder::from_lookup(lookup_from(&[
            ("TRANSMISSION_URL", "http://nas:9091/transmission/rpc"),
            ("TRANSMISSION_USERNAME", "admin"),
            ("TRANSMISSION_PASSWORD", "secret"),
            ("TRANSMISSION_TIMEOUT_MS", "5000"),
        ]))
        .unwrap();

        assert_eq!(builder.url, "http://nas:9091/transmission/rpc");
        assert_eq!(builder.credentials, Credentials::new("admin", "secret"));
        assert_eq!(builder.timeout, Duration::from_millis(5000));
        assert_eq!(builder.connect_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_from_lookup_defaults_when_unset() {
        let builder = ClientBuilder::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(builder.url, DEFAULT_URL);
        assert_eq!(builder.credentials, Credentials::default());
        assert_eq!(builder.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let result =
            ClientBuilder::from_lookup(lookup_from(&[("TRANSMISSION_TIMEOUT_MS", "soon")]));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
