//! Client metrics
//!
//! OpenTelemetry instruments updated by [`TransmissionClient::execute`]
//! when metrics are enabled on the builder:
//!
//! - **transmission.client.requests.total**: calls by method and outcome
//! - **transmission.client.request.duration**: call latency in seconds,
//!   including a session-id retry
//! - **transmission.client.errors.total**: failed calls by error kind
//! - **transmission.client.session.refreshes**: session ids taken from 409s
//!
//! [`TransmissionClient::execute`]: crate::TransmissionClient::execute

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    InstrumentationScope, KeyValue,
};
use transmission_rpc_core::ErrorKind;

/// Client metrics for monitoring
pub struct ClientMetrics {
    /// Total number of calls
    pub requests_total: Counter<u64>,
    /// Call duration in seconds
    pub request_duration: Histogram<f64>,
    /// Total number of failed calls
    pub errors_total: Counter<u64>,
    /// Total number of session id refreshes
    pub session_refreshes: Counter<u64>,
}

impl ClientMetrics {
    /// Create metrics on the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        let scope = InstrumentationScope::builder(service_name.into()).build();
        let meter = global::meter_with_scope(scope);
        Self::new_with_meter(&meter)
    }

    /// Create metrics on a specific meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("transmission.client.requests.total")
                .with_description("Total number of RPC calls")
                .build(),
            request_duration: meter
                .f64_histogram("transmission.client.request.duration")
                .with_description("RPC call duration in seconds")
                .build(),
            errors_total: meter
                .u64_counter("transmission.client.errors.total")
                .with_description("Total number of failed RPC calls")
                .build(),
            session_refreshes: meter
                .u64_counter("transmission.client.session.refreshes")
                .with_description("Session ids adopted from 409 responses")
                .build(),
        }
    }

    /// Record a finished call
    ///
    /// `outcome` is "success", "rpc_error" (decoded but not successful) or
    /// "error".
    pub fn record_request(&self, method: &str, outcome: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("outcome", outcome.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record a failed call
    pub fn record_error(&self, kind: ErrorKind) {
        self.errors_total
            .add(1, &[KeyValue::new("error_kind", kind.as_str())]);
    }

    /// Record a session id refresh
    pub fn record_session_refresh(&self) {
        self.session_refreshes.add(1, &[]);
    }
}
