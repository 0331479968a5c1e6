//! Transmission RPC client over HTTP
//!
//! This crate talks to a Transmission daemon's RPC endpoint. It sends request
//! envelopes as HTTP POSTs with Basic authentication and handles the daemon's
//! session-id handshake transparently.
//!
//! # Core Features
//!
//! - **Session handshake**: a 409 response's session id is adopted and the
//!   call is retried once
//! - **Typed responses**: the `arguments` object decodes into any
//!   `Deserialize` shape
//! - **Torrent and session methods**: start, stop, add, get, session-get,
//!   session-set
//! - **Error classification**: every failure carries an `ErrorKind`
//!   (auth, network, decode, config, rpc)
//! - **Observability**: `tracing` spans per call, optional OpenTelemetry
//!   metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use transmission_rpc_client::TransmissionClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TransmissionClient::new(
//!         "http://127.0.0.1:9091/transmission/rpc",
//!         "admin",
//!         "admin",
//!     )?;
//!
//!     // Start torrents 1 and 2
//!     let started = client.torrent_start(Some(&[1, 2])).await?;
//!     println!("started: {}", started);
//!
//!     for torrent in client.torrent_get(None).await? {
//!         println!("{} {:.0}%", torrent.name, torrent.percent_done * 100.0);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Raw Requests
//!
//! ```rust,no_run
//! use transmission_rpc_client::TransmissionClient;
//! use transmission_rpc_core::{RpcRequest, RpcResponse};
//! use serde_json::json;
//!
//! # async fn example() -> transmission_rpc_core::Result<()> {
//! let client = TransmissionClient::new("http://127.0.0.1:9091/transmission/rpc", "admin", "admin")?;
//!
//! let request = RpcRequest::new("free-space").argument("path", json!("/downloads"));
//! let response: RpcResponse = client.execute(&request).await?;
//! println!("{}", response.arguments);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod auth;
mod client;
mod client_builder;
mod metrics;
mod session;
mod session_state;
mod torrent;

pub use auth::Credentials;
pub use client::TransmissionClient;
pub use client_builder::{ClientBuilder, DEFAULT_TIMEOUT, DEFAULT_URL};
pub use metrics::ClientMetrics;
pub use session::{SessionInfo, SessionSettings};
pub use session_state::SessionState;
pub use torrent::{Torrent, TorrentStatus, TORRENT_FIELDS};

// Re-export core types
pub use transmission_rpc_core::{
    Error, ErrorKind, NoArguments, ObservabilityConfig, Result, RpcRequest, RpcResponse,
    SessionToken,
};
