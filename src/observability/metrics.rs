//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method, status
//! - `api_request_duration_seconds` (histogram): latency distribution
//! - `api_search_settings_updates_total` (counter): settings calls by category, outcome
//! - `api_schema_attempts_total` (counter): schema bootstrap attempts by outcome
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let status = status.to_string();
    counter!(
        "api_requests_total",
        "method" => method.to_string(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "api_request_duration_seconds",
        "method" => method.to_string(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_search_update(category: &'static str, success: bool) {
    counter!(
        "api_search_settings_updates_total",
        "category" => category,
        "outcome" => outcome(success)
    )
    .increment(1);
}

pub fn record_schema_attempt(success: bool) {
    counter!("api_schema_attempts_total", "outcome" => outcome(success)).increment(1);
}

fn outcome(success: bool) -> &'static str {
    if success {
        "ok"
    } else {
        "error"
    }
}
