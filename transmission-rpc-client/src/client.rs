//! Transmission RPC client over HTTP
//!
//! This module provides the `TransmissionClient` type, which POSTs request
//! envelopes to the daemon and runs the session-id handshake:
//!
//! 1. **Send**: POST the body with Basic auth and the current session id
//!    (none on the very first call)
//! 2. **409**: the daemon hands out a session id; adopt it and send again
//! 3. **200**: decode the response envelope
//!
//! A call is sent at most twice. A second 409 in the same call is reported
//! as [`Error::SessionConflict`] rather than retried.
//!
//! # Cloning
//!
//! `TransmissionClient` is cheaply cloneable using `Arc` internally. All
//! clones share one HTTP connection pool and one session id, so a refresh
//! made by one task is seen by the others.

use crate::{ClientBuilder, ClientMetrics, Credentials, SessionState};
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use transmission_rpc_core::{codec, Error, Result, RpcRequest, RpcResponse, SessionToken};

/// Where a call is in the session-id handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    /// Sent with whatever session id was held, possibly none
    First,
    /// Re-sent with the id from a 409; another 409 is terminal
    Refreshed,
}

/// Lowercase form of `X-Transmission-Session-Id`
pub(crate) fn session_header() -> HeaderName {
    HeaderName::from_static("x-transmission-session-id")
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) endpoint: Url,
    pub(crate) credentials: Credentials,
    pub(crate) auth_header: HeaderValue,
    pub(crate) session: SessionState,
    pub(crate) metrics: Option<ClientMetrics>,
}

/// Client for a Transmission daemon
#[derive(Clone)]
pub struct TransmissionClient {
    pub(crate) inner: Arc<ClientInner>,
}

impl TransmissionClient {
    /// Create a client with default timeouts
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the URL cannot be parsed.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        ClientBuilder::new(url).credentials(username, password).build()
    }

    /// Start configuring a client
    pub fn builder(url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(url)
    }

    /// The RPC endpoint
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// The session id that will be sent on the next call
    pub async fn session_token(&self) -> Option<SessionToken> {
        self.inner.session.current().await
    }

    /// How many times the session id has been replaced from a 409
    pub fn session_refreshes(&self) -> u64 {
        self.inner.session.refresh_count()
    }

    /// Forget the session id; the next call starts the handshake over
    pub async fn reset_session(&self) {
        self.inner.session.clear().await;
        tracing::debug!("Session id cleared");
    }

    /// Send a request and decode the response envelope
    ///
    /// A non-success `result` is returned as a normal response; use
    /// [`RpcResponse::is_success`] or [`RpcResponse::into_arguments`] to
    /// check it.
    ///
    /// # Errors
    ///
    /// - `Error::Unauthorized` on HTTP 401
    /// - `Error::SessionConflict` on a second 409 within this call
    /// - `Error::MissingSessionId` on a 409 without a session id header
    /// - `Error::UnexpectedStatus` on any other non-200 status
    /// - `Error::Transport` when the exchange itself fails
    /// - `Error::Decode` when the 200 body is not a valid envelope
    #[tracing::instrument(skip(self, request), fields(method = %request.method))]
    pub async fn execute<A>(&self, request: &RpcRequest) -> Result<RpcResponse<A>>
    where
        A: DeserializeOwned + Default,
    {
        let start = std::time::Instant::now();
        let result = self.execute_inner(request).await;
        let duration = start.elapsed().as_secs_f64();

        if let Some(ref m) = self.inner.metrics {
            match &result {
                Ok(response) if response.is_success() => {
                    m.record_request(&request.method, "success", duration)
                }
                Ok(_) => m.record_request(&request.method, "rpc_error", duration),
                Err(e) => {
                    m.record_request(&request.method, "error", duration);
                    m.record_error(e.kind());
                }
            }
        }

        match &result {
            Ok(response) if !response.is_success() => {
                tracing::debug!(result = %response.result, "Daemon reported failure");
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, kind = %e.kind(), "Request failed"),
        }

        result
    }

    async fn execute_inner<A>(&self, request: &RpcRequest) -> Result<RpcResponse<A>>
    where
        A: DeserializeOwned + Default,
    {
        let body = codec::encode_request(request)?;
        tracing::debug!(body = %String::from_utf8_lossy(&body), "Sending request");

        let mut attempt = Attempt::First;
        loop {
            let response = self.send(&body).await?;

            match (response.status(), attempt) {
                (StatusCode::OK, _) => {
                    let bytes = response
                        .bytes()
                        .await
                        .map_err(|e| Error::Transport(format!("reading response body: {}", e)))?;
                    tracing::debug!(body = %String::from_utf8_lossy(&bytes), "Received response");
                    return codec::decode_response(&bytes);
                }
                (StatusCode::CONFLICT, Attempt::First) => {
                    let value = response
                        .headers()
                        .get(session_header())
                        .ok_or(Error::MissingSessionId)?;
                    let token = value.to_str().map(SessionToken::from).map_err(|_| {
                        Error::Transport("session id header is not valid ASCII".to_string())
                    })?;

                    self.inner.session.replace(token).await;
                    if let Some(ref m) = self.inner.metrics {
                        m.record_session_refresh();
                    }
                    tracing::info!("Session id refreshed, retrying");
                    attempt = Attempt::Refreshed;
                }
                (StatusCode::CONFLICT, Attempt::Refreshed) => {
                    tracing::warn!("Session id rejected again after refresh");
                    return Err(Error::SessionConflict);
                }
                (StatusCode::UNAUTHORIZED, _) => {
                    return Err(Error::Unauthorized {
                        username: self.inner.credentials.username().to_string(),
                    });
                }
                (status, _) => {
                    return Err(Error::UnexpectedStatus {
                        status: status.as_u16(),
                    });
                }
            }
        }
    }

    /// One HTTP exchange with the current session id
    async fn send(&self, body: &[u8]) -> Result<reqwest::Response> {
        let inner = &self.inner;
        let request = inner
            .session
            .with_current(|token| {
                let mut builder = inner
                    .http
                    .post(inner.endpoint.clone())
                    .header(AUTHORIZATION, inner.auth_header.clone())
                    .header(CONTENT_TYPE, "application/json")
                    .body(body.to_vec());
                if let Some(token) = token {
                    builder = builder.header(session_header(), token.as_str());
                }
                builder
            })
            .await;

        request
            .send()
            .await
            .map_err(|e| Error::Transport(transport_message(&e)))
    }
}

fn transport_message(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {}", error)
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}
