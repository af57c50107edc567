//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define profiler metrics (requests, latency, response size)
//! - Render a Prometheus text exposition at the end of a run
//!
//! # Metrics
//! - `http_profile_requests_total` (counter): completed requests by status
//! - `http_profile_request_duration_ms` (histogram): exchange latency
//! - `http_profile_response_bytes` (histogram): bytes received per request
//!
//! # Design Decisions
//! - Updates go through the `metrics` facade; without an installed recorder
//!   they are no-ops
//! - No HTTP listener; the exposition is printed once

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder.
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            tracing::debug!("Prometheus recorder installed");
            Some(handle)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics recorder");
            None
        }
    }
}

/// Record one completed socket exchange.
pub fn record_exchange(elapsed_ms: u64, bytes: usize) {
    metrics::histogram!("http_profile_request_duration_ms").record(elapsed_ms as f64);
    metrics::histogram!("http_profile_response_bytes").record(bytes as f64);
}

/// Record the status of an interpreted response.
pub fn record_status(status: u16) {
    metrics::counter!("http_profile_requests_total", "status" => status.to_string()).increment(1);
}
