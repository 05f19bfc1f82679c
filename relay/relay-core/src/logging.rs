use serde_json::Value;
use std::fmt::Debug;

/// Observes each request a client sends and the response it gets back.
pub trait RelayLogger: Send + Sync + Debug {
    fn log_request(&self, request_type: &str, url: &str, request_json: &Value);
    fn log_response(&self, request_type: &str, url: &str, status: u16, response_json: &Value);
}

/// Emits requests and responses as `tracing` debug events.
#[derive(Debug, Default)]
pub struct TracingRelayLogger;

impl RelayLogger for TracingRelayLogger {
    fn log_request(&self, request_type: &str, url: &str, request_json: &Value) {
        tracing::debug!(
            request_type,
            url,
            request = %request_json,
            "relay request"
        );
    }

    fn log_response(&self, request_type: &str, url: &str, status: u16, response_json: &Value) {
        tracing::debug!(
            request_type,
            url,
            status,
            response = %response_json,
            "relay response"
        );
    }
}
