//! Session methods
//!
//! "Session" here means the daemon's global settings (`session-get` and
//! `session-set`), not the session id used by the HTTP handshake.

use crate::TransmissionClient;
use serde::{Deserialize, Serialize};
use transmission_rpc_core::{method, NoArguments, Result, RpcRequest};

/// Settings changed by [`TransmissionClient::session_set`]
///
/// Only the fields that were set are sent. Setting a field twice keeps the
/// last value.
///
/// # Examples
///
/// ```rust
/// use transmission_rpc_client::SessionSettings;
///
/// let settings = SessionSettings::new()
///     .alt_speed_down(100)
///     .alt_speed_down(250)
///     .alt_speed_enabled(true);
/// assert_eq!(settings.alt_speed_down, Some(250));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionSettings {
    /// Alternative download limit, KB/s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_speed_down: Option<i64>,
    /// Alternative upload limit, KB/s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_speed_up: Option<i64>,
    /// Use the alternative limits instead of the normal ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_speed_enabled: Option<bool>,
    /// Download limit, KB/s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_down: Option<i64>,
    /// Enforce `speed_limit_down`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_down_enabled: Option<bool>,
    /// Upload limit, KB/s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_up: Option<i64>,
    /// Enforce `speed_limit_up`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_up_enabled: Option<bool>,
    /// Default directory for new torrents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
}

impl SessionSettings {
    /// Create settings with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alternative download limit, KB/s
    pub fn alt_speed_down(mut self, kbps: i64) -> Self {
        self.alt_speed_down = Some(kbps);
        self
    }

    /// Set the alternative upload limit, KB/s
    pub fn alt_speed_up(mut self, kbps: i64) -> Self {
        self.alt_speed_up = Some(kbps);
        self
    }

    /// Switch the alternative limits on or off
    pub fn alt_speed_enabled(mut self, enabled: bool) -> Self {
        self.alt_speed_enabled = Some(enabled);
        self
    }

    /// Set the download limit, KB/s
    pub fn speed_limit_down(mut self, kbps: i64) -> Self {
        self.speed_limit_down = Some(kbps);
        self
    }

    /// Switch the download limit on or off
    pub fn speed_limit_down_enabled(mut self, enabled: bool) -> Self {
        self.speed_limit_down_enabled = Some(enabled);
        self
    }

    /// Set the upload limit, KB/s
    pub fn speed_limit_up(mut self, kbps: i64) -> Self {
        self.speed_limit_up = Some(kbps);
        self
    }

    /// Switch the upload limit on or off
    pub fn speed_limit_up_enabled(mut self, enabled: bool) -> Self {
        self.speed_limit_up_enabled = Some(enabled);
        self
    }

    /// Set the default download directory
    pub fn download_dir(mut self, dir: impl Into<String>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Daemon settings returned by [`TransmissionClient::session_get`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SessionInfo {
    /// Daemon version string, e.g. "4.0.5 (a6fe2a64aa)"
    pub version: String,
    /// RPC protocol version the daemon speaks
    pub rpc_version: i64,
    /// Default directory for new torrents
    pub download_dir: String,
    /// Alternative download limit, KB/s
    pub alt_speed_down: Option<i64>,
    /// Alternative upload limit, KB/s
    pub alt_speed_up: Option<i64>,
    /// Whether the alternative limits are in effect
    pub alt_speed_enabled: Option<bool>,
    /// Download limit, KB/s
    pub speed_limit_down: Option<i64>,
    /// Whether the download limit is enforced
    pub speed_limit_down_enabled: Option<bool>,
    /// Upload limit, KB/s
    pub speed_limit_up: Option<i64>,
    /// Whether the upload limit is enforced
    pub speed_limit_up_enabled: Option<bool>,
}

impl TransmissionClient {
    /// Read the daemon's settings
    ///
    /// # Errors
    ///
    /// Returns `Error::Rpc` if the daemon reports a failure.
    pub async fn session_get(&self) -> Result<SessionInfo> {
        let request = RpcRequest::new(method::SESSION_GET);
        self.execute(&request).await?.into_arguments()
    }

    /// Change the daemon's settings
    ///
    /// Returns whether the daemon reported success.
    pub async fn session_set(&self, settings: &SessionSettings) -> Result<bool> {
        tracing::info!(settings = ?settings, "Changing session settings");
        let request = RpcRequest::with_arguments(method::SESSION_SET, settings)?;
        Ok(self.execute::<NoArguments>(&request).await?.is_success())
    }
}
