//! transmission-rpc - Transmission daemon RPC over HTTP
//!
//! This is the main convenience crate that re-exports the sub-crates. Use it
//! if you want a single dependency for talking to a Transmission daemon.
//!
//! # Architecture
//!
//! - **transmission-rpc-core**: envelope types, codec, error taxonomy,
//!   observability setup
//! - **transmission-rpc-client**: HTTP client with the session-id handshake,
//!   torrent and session methods
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use transmission_rpc::TransmissionClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TransmissionClient::new(
//!         "http://127.0.0.1:9091/transmission/rpc",
//!         "admin",
//!         "admin",
//!     )?;
//!
//!     if client.torrent_stop(None).await? {
//!         println!("All torrents stopped");
//!     }
//!     Ok(())
//! }
//! ```

pub use transmission_rpc_client as client;
pub use transmission_rpc_core as core;

// Convenience re-exports of the most commonly used types
pub use transmission_rpc_client::{ClientBuilder, TransmissionClient};
pub use transmission_rpc_core::{Error, ErrorKind, Result};
