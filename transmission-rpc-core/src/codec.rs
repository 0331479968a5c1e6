//! Codec for Transmission RPC envelopes
//!
//! The executor never touches `serde_json` directly; it goes through the two
//! functions here. Errors are mapped onto the crate's taxonomy:
//!
//! - encoding a request fails with `Error::Serialization`
//! - a response body that is not valid JSON, or not the expected shape,
//!   fails with `Error::Decode`
//!
//! Both fall under `ErrorKind::Decode`, never `ErrorKind::Network`.
//!
//! # Examples
//!
//! ```rust
//! use transmission_rpc_core::{codec, method, NoArguments, RpcRequest, RpcResponse};
//!
//! let request = RpcRequest::new(method::TORRENT_STOP);
//! let body = codec::encode_request(&request).unwrap();
//! assert!(body.starts_with(b"{"));
//!
//! let response: RpcResponse<NoArguments> =
//!     codec::decode_response(br#"{"result":"success","arguments":{}}"#).unwrap();
//! assert!(response.is_success());
//! ```

use crate::error::{Error, Result};
use crate::types::{RpcRequest, RpcResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode any serializable value to JSON bytes
pub fn encode<T: Serialize>(msg: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode JSON bytes into any deserializable value
///
/// # Errors
///
/// Returns `Error::Decode` if the bytes are not valid JSON for `T`.
pub fn decode_as<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    serde_json::from_slice(data).map_err(|e| Error::Decode(e.to_string()))
}

/// Encode a request envelope to the request body
pub fn encode_request(req: &RpcRequest) -> Result<Vec<u8>> {
    encode(req)
}

/// Decode a response body into a response envelope of shape `A`
///
/// # Errors
///
/// Returns `Error::Decode` if the body is not JSON, lacks a `result` field,
/// or its `arguments` do not fit `A`.
pub fn decode_response<A>(data: &[u8]) -> Result<RpcResponse<A>>
where
    A: DeserializeOwned + Default,
{
    decode_as(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{method, NoArguments};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Torrents {
        torrents: Vec<serde_json::Value>,
    }

    #[test]
    fn test_encode_request_is_deterministic() {
        let req = RpcRequest::new(method::TORRENT_GET)
            .argument("ids", json!([1, 2]))
            .argument("fields", json!(["id", "name"]));

        let first = encode_request(&req).unwrap();
        let second = encode_request(&req).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_request_key_order_independent() {
        let a = RpcRequest::new(method::SESSION_SET)
            .argument("speed-limit-up", 10)
            .argument("alt-speed-down", 20);
        let b = RpcRequest::new(method::SESSION_SET)
            .argument("alt-speed-down", 20)
            .argument("speed-limit-up", 10);

        assert_eq!(encode_request(&a).unwrap(), encode_request(&b).unwrap());
    }

    #[test]
    fn test_encode_request_shape() {
        let req = RpcRequest::new(method::TORRENT_START).argument("ids", json!([1, 2]));
        let value: serde_json::Value =
            serde_json::from_slice(&encode_request(&req).unwrap()).unwrap();

        assert_eq!(
            value,
            json!({"method": "torrent-start", "arguments": {"ids": [1, 2]}})
        );
    }

    #[test]
    fn test_decode_response_typed() {
        let body = br#"{"result":"success","arguments":{"torrents":[{"id":1}]}}"#;
        let resp: RpcResponse<Torrents> = decode_response(body).unwrap();

        assert!(resp.is_success());
        assert_eq!(resp.arguments.torrents.len(), 1);
    }

    #[test]
    fn test_decode_invalid_json() {
        let result = decode_response::<NoArguments>(b"not valid json");
        match result {
            Err(Error::Decode(_)) => {}
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty_body() {
        let result = decode_response::<NoArguments>(b"");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_missing_result() {
        let result = decode_response::<NoArguments>(br#"{"arguments":{}}"#);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_wrong_shape() {
        let body = br#"{"result":"success","arguments":{"torrents":"nope"}}"#;
        let result = decode_response::<Torrents>(body);
        assert!(result.unwrap_err().is_decode());
    }

    #[test]
    fn test_decode_preserves_tag() {
        let resp: RpcResponse<NoArguments> =
            decode_response(br#"{"result":"success","arguments":{},"tag":42}"#).unwrap();
        assert_eq!(resp.tag, Some(42));
    }
}
