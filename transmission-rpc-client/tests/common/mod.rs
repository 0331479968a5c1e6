//! Common test utilities for transmission-rpc-client integration tests
//!
//! A `wiremock` server stands in for the daemon. [`mount_handshake`] gives it
//! the daemon's session-id behavior: 409 with a session id unless the
//! request already carries that id.

#![allow(dead_code)]

use serde_json::{json, Value};
use transmission_rpc_client::TransmissionClient;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const RPC_PATH: &str = "/transmission/rpc";
pub const SESSION_HEADER: &str = "x-transmission-session-id";

/// `Basic base64("admin:admin")`
pub const ADMIN_AUTH: &str = "Basic YWRtaW46YWRtaW4=";

pub fn rpc_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), RPC_PATH)
}

/// Client authenticating as admin/admin against the mock server
pub fn client_for(server: &MockServer) -> TransmissionClient {
    TransmissionClient::new(rpc_url(server), "admin", "admin").unwrap()
}

/// Client that already holds `token`
pub fn client_with_token(server: &MockServer, token: &str) -> TransmissionClient {
    TransmissionClient::builder(rpc_url(server))
        .credentials("admin", "admin")
        .with_session_token(token)
        .build()
        .unwrap()
}

pub fn success_body() -> Value {
    json!({"result": "success", "arguments": {}})
}

/// A 409 handing out `token`
pub fn conflict(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(409).insert_header("X-Transmission-Session-Id", token)
}

/// Answer `body` to requests carrying `token`, 409 with `token` otherwise
pub async fn mount_handshake(server: &MockServer, token: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(header(SESSION_HEADER, token))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .respond_with(conflict(token))
        .with_priority(10)
        .mount(server)
        .await;
}

/// Session id sent with a recorded request
pub fn session_id_of(request: &Request) -> Option<String> {
    request
        .headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// JSON body of a recorded request
pub fn body_of(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}
