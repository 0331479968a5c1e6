//! Error types for transmission-rpc
//!
//! Every failure a call can produce is one variant of [`Error`]. Callers that
//! only care about the broad category use [`Error::kind`], which folds the
//! variants into an [`ErrorKind`]:
//!
//! - **Auth**: the daemon rejected the credentials (HTTP 401)
//! - **Network**: transport failures, unexpected status codes, and a session
//!   id that the daemon keeps rejecting
//! - **Decode**: the daemon answered, but the body did not match the expected
//!   shape (or the request itself could not be encoded)
//! - **Config**: the client could not be built from the supplied settings
//! - **Rpc**: the daemon decoded the call but reported a non-success result
//!
//! Only the first HTTP 409 of a call is recoverable, and it never reaches
//! the caller as an error: the client refreshes its session id and retries.
//!
//! # Examples
//!
//! ```rust
//! use transmission_rpc_core::{Error, ErrorKind};
//!
//! let error = Error::UnexpectedStatus { status: 502 };
//! assert_eq!(error.kind(), ErrorKind::Network);
//! assert!(!error.is_auth());
//! ```

use thiserror::Error;

/// Result type for transmission-rpc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`]
///
/// A decode failure means the daemon answered; it is never reported as
/// `Network`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Credentials rejected
    Auth,
    /// Transport or protocol failure before a usable response was obtained
    Network,
    /// Response (or request) JSON did not match the expected shape
    Decode,
    /// Invalid client configuration
    Config,
    /// Daemon reported a non-success `result`
    Rpc,
}

impl ErrorKind {
    /// Short label, used as a metric attribute and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Auth => "auth",
            ErrorKind::Network => "network",
            ErrorKind::Decode => "decode",
            ErrorKind::Config => "config",
            ErrorKind::Rpc => "rpc",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application-level error type for transmission-rpc operations
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The daemon answered HTTP 401
    ///
    /// Terminal. The password is not part of the message.
    #[error("authentication failed for user '{username}'")]
    Unauthorized {
        /// The username that was rejected
        username: String,
    },

    /// Transport layer failure
    ///
    /// Connection refused, DNS failure, timeout, or the response body could
    /// not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The daemon answered with a status code outside {200, 401, 409}
    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// The HTTP status code received
        status: u16,
    },

    /// The daemon answered 409 again after the session id was refreshed
    #[error("session id rejected after refresh")]
    SessionConflict,

    /// The daemon answered 409 without an `X-Transmission-Session-Id` header
    #[error("409 response carried no session id")]
    MissingSessionId,

    /// The response body did not match the expected shape
    #[error("decode error: {0}")]
    Decode(String),

    /// The request could not be encoded to JSON
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The client could not be built from its configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The daemon reported a non-success result string
    #[error("daemon returned '{0}'")]
    Rpc(String),
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Unauthorized { .. } => ErrorKind::Auth,
            Error::Transport(_)
            | Error::UnexpectedStatus { .. }
            | Error::SessionConflict
            | Error::MissingSessionId => ErrorKind::Network,
            Error::Decode(_) | Error::Serialization(_) => ErrorKind::Decode,
            Error::InvalidConfig(_) => ErrorKind::Config,
            Error::Rpc(_) => ErrorKind::Rpc,
        }
    }

    /// True for credential failures
    pub fn is_auth(&self) -> bool {
        self.kind() == ErrorKind::Auth
    }

    /// True for transport and protocol failures
    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::Network
    }

    /// True for JSON shape mismatches
    pub fn is_decode(&self) -> bool {
        self.kind() == ErrorKind::Decode
    }
}
