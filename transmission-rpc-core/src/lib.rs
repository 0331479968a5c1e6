//! Core types and codec for the Transmission RPC protocol
//!
//! This crate holds everything about the protocol that does not need a
//! network connection:
//!
//! - **Types**: request/response envelopes, method names, the session token
//! - **Codec**: turning envelopes into request bodies and response bodies
//!   back into typed envelopes
//! - **Error handling**: the error taxonomy shared by the client crates
//! - **Observability**: OpenTelemetry and `tracing` initialization
//!
//! The HTTP exchange, including the session-id handshake, lives in
//! `transmission-rpc-client`.
//!
//! # Example
//!
//! ```rust
//! use transmission_rpc_core::{codec, method, NoArguments, RpcRequest, RpcResponse};
//! use serde_json::json;
//!
//! let request = RpcRequest::new(method::TORRENT_START).argument("ids", json!([1, 2]));
//! let body = codec::encode_request(&request).unwrap();
//!
//! let response: RpcResponse<NoArguments> =
//!     codec::decode_response(br#"{"result":"success","arguments":{}}"#).unwrap();
//! assert!(response.is_success());
//! # let _ = body;
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use types::{
    method, NoArguments, RpcRequest, RpcResponse, SessionToken, RESULT_SUCCESS,
    SESSION_ID_HEADER,
};
