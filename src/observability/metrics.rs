//! Metrics collection and exposition.
//!
//! # Metrics
//! - `workbench_requests_total` (counter): requests by route, status
//! - `workbench_request_duration_seconds` (histogram): latency by route
//! - `workbench_callbacks_pending` (gauge): registrations awaiting retrieval
//! - `workbench_extensions_discovered` (gauge): size of the extension catalog
//!
//! Recording is a no-op until [`init_metrics`] installs an exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "workbench_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("workbench_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_callbacks_pending(count: usize) {
    metrics::gauge!("workbench_callbacks_pending").set(count as f64);
}

pub fn record_extensions_discovered(count: usize) {
    metrics::gauge!("workbench_extensions_discovered").set(count as f64);
}
