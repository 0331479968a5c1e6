//! Transmission RPC envelope types
//!
//! The daemon speaks a small JSON protocol over HTTP POST. Every call is a
//! request envelope and every answer a response envelope:
//!
//! ```text
//! -> {"method": "torrent-start", "arguments": {"ids": [1, 2]}, "tag": 7}
//! <- {"result": "success", "arguments": {}, "tag": 7}
//! ```
//!
//! The `result` string is exactly `"success"` when the daemon carried out the
//! call; anything else is a human-readable error description. The `tag` is an
//! optional number the daemon echoes back unchanged.
//!
//! # Session ids
//!
//! Besides the body, the daemon requires an `X-Transmission-Session-Id`
//! header. A client learns its value from the first HTTP 409 the daemon
//! sends. [`SessionToken`] wraps that value.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header carrying the session id, on both requests and 409 responses
pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

/// The `result` value the daemon uses for a successful call
pub const RESULT_SUCCESS: &str = "success";

/// Method names understood by the daemon
pub mod method {
    /// Start torrents
    pub const TORRENT_START: &str = "torrent-start";
    /// Stop torrents
    pub const TORRENT_STOP: &str = "torrent-stop";
    /// Add a torrent from metainfo or a URL
    pub const TORRENT_ADD: &str = "torrent-add";
    /// Read torrent fields
    pub const TORRENT_GET: &str = "torrent-get";
    /// Read session settings
    pub const SESSION_GET: &str = "session-get";
    /// Change session settings
    pub const SESSION_SET: &str = "session-set";
}

/// Opaque session id issued by the daemon
///
/// The client never inspects or expires it; a stale token is only discovered
/// when the daemon answers 409 again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw header value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        SessionToken(s.to_string())
    }
}

impl From<String> for SessionToken {
    fn from(s: String) -> Self {
        SessionToken(s)
    }
}

/// Transmission RPC request envelope
///
/// A method name plus an argument object. Arguments are stored in a
/// `serde_json::Map`, which keeps keys sorted, so encoding the same request
/// twice yields identical bytes.
///
/// # Examples
///
/// ```rust
/// use transmission_rpc_core::{method, RpcRequest};
/// use serde_json::json;
///
/// let request = RpcRequest::new(method::TORRENT_START).argument("ids", json!([1, 2]));
/// assert_eq!(request.method, "torrent-start");
/// assert_eq!(request.arguments["ids"], json!([1, 2]));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Name of the remote method to invoke
    pub method: String,
    /// Method arguments; always sent, empty when the method takes none
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
    /// Optional tag the daemon echoes back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<i64>,
}

impl RpcRequest {
    /// Create a request with no arguments
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: serde_json::Map::new(),
            tag: None,
        }
    }

    /// Create a request whose arguments come from a serializable value
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if `arguments` does not serialize to a
    /// JSON object.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transmission_rpc_core::RpcRequest;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Ids { ids: Vec<i64> }
    ///
    /// let request = RpcRequest::with_arguments("torrent-stop", &Ids { ids: vec![3] }).unwrap();
    /// assert_eq!(request.arguments["ids"][0], 3);
    /// ```
    pub fn with_arguments<T: Serialize>(method: impl Into<String>, arguments: &T) -> Result<Self> {
        let value =
            serde_json::to_value(arguments).map_err(|e| Error::Serialization(e.to_string()))?;

        match value {
            serde_json::Value::Object(arguments) => Ok(Self {
                method: method.into(),
                arguments,
                tag: None,
            }),
            other => Err(Error::Serialization(format!(
                "arguments must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Add (or overwrite) a single argument
    pub fn argument(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Set the tag
    pub fn with_tag(mut self, tag: i64) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// Transmission RPC response envelope
///
/// `A` is the shape the `arguments` object decodes into. It defaults to a
/// raw `serde_json::Value`; use [`NoArguments`] for calls whose arguments are
/// irrelevant. Missing `arguments` decode to `A::default()`.
///
/// # Examples
///
/// ```rust
/// use transmission_rpc_core::{codec, NoArguments, RpcResponse};
///
/// let response: RpcResponse<NoArguments> =
///     codec::decode_response(br#"{"result":"success","arguments":{}}"#).unwrap();
/// assert!(response.is_success());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse<A = serde_json::Value> {
    /// `"success"` or an error description
    pub result: String,
    /// Method-specific payload
    #[serde(default)]
    pub arguments: A,
    /// Tag echoed from the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<i64>,
}

impl<A> RpcResponse<A> {
    /// True when `result` is exactly `"success"`
    pub fn is_success(&self) -> bool {
        self.result == RESULT_SUCCESS
    }

    /// The error description, if the call did not succeed
    pub fn error_message(&self) -> Option<&str> {
        if self.is_success() {
            None
        } else {
            Some(&self.result)
        }
    }

    /// Take the arguments of a successful response
    ///
    /// # Errors
    ///
    /// Returns `Error::Rpc` carrying the `result` string when the call did
    /// not succeed.
    pub fn into_arguments(self) -> Result<A> {
        if self.is_success() {
            Ok(self.arguments)
        } else {
            Err(Error::Rpc(self.result))
        }
    }
}

/// Argument shape for responses whose payload is ignored
///
/// Decodes from any JSON object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoArguments {}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let req = RpcRequest::new(method::TORRENT_START).argument("ids", json!([1, 2]));
        let json = serde_json::to_string(&req).unwrap();

        assert!(json.contains("\"method\":\"torrent-start\""));
        assert!(json.contains("\"arguments\":{\"ids\":[1,2]}"));
        assert!(!json.contains("\"tag\""));
    }

    #[test]
    fn test_request_without_arguments_sends_empty_object() {
        let req = RpcRequest::new(method::SESSION_GET);
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"method":"session-get","arguments":{}}"#);
    }

    #[test]
    fn test_request_tag() {
        let req = RpcRequest::new(method::SESSION_GET).with_tag(7);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"tag\":7"));
    }

    #[test]
    fn test_with_arguments_rejects_non_object() {
        let result = RpcRequest::with_arguments(method::TORRENT_GET, &vec![1, 2, 3]);
        match result {
            Err(Error::Serialization(msg)) => assert!(msg.contains("an array")),
            other => panic!("Expected Serialization error, got {:?}", other),
        }
    }

    #[test]
    fn test_argument_overwrites() {
        let req = RpcRequest::new(method::SESSION_SET)
            .argument("alt-speed-down", 100)
            .argument("alt-speed-down", 200);

        assert_eq!(req.arguments.len(), 1);
        assert_eq!(req.arguments["alt-speed-down"], 200);
    }

    #[test]
    fn test_response_success() {
        let resp: RpcResponse = serde_json::from_value(json!({
            "result": "success",
            "arguments": {"torrents": []}
        }))
        .unwrap();

        assert!(resp.is_success());
        assert!(resp.error_message().is_none());
        assert_eq!(resp.arguments["torrents"], json!([]));
    }

    #[test]
    fn test_response_failure() {
        let resp: RpcResponse<NoArguments> =
            serde_json::from_value(json!({"result": "duplicate torrent"})).unwrap();

        assert!(!resp.is_success());
        assert_eq!(resp.error_message(), Some("duplicate torrent"));
        match resp.into_arguments() {
            Err(Error::Rpc(msg)) => assert_eq!(msg, "duplicate torrent"),
            other => panic!("Expected Rpc error, got {:?}", other),
        }
    }

    #[test]
    fn test_response_missing_arguments_defaults() {
        let resp: RpcResponse = serde_json::from_value(json!({"result": "success"})).unwrap();
        assert!(resp.arguments.is_null());
        assert!(resp.tag.is_none());
    }

    #[test]
    fn test_no_arguments_ignores_payload() {
        let resp: RpcResponse<NoArguments> = serde_json::from_value(json!({
            "result": "success",
            "arguments": {"anything": 1}
        }))
        .unwrap();
        assert_eq!(resp.arguments, NoArguments {});
    }

    #[test]
    fn test_session_token_display() {
        let token = SessionToken::from("abc123");
        assert_eq!(token.as_str(), "abc123");
        assert_eq!(token.to_string(), "abc123");
        assert_eq!(token, SessionToken::new(String::from("abc123")));
    }
}
