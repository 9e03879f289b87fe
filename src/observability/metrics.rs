//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define request metrics
//! - Expose a Prometheus-compatible scrape endpoint
//!
//! # Metrics
//! - `jinja_hub_requests_total` (counter): requests by route kind, status
//! - `jinja_hub_request_duration_seconds` (histogram): latency by route kind
//! - `jinja_hub_sites_enabled` (gauge): enabled sites in the registry
//!
//! # Design Decisions
//! - Labels are bounded: route kind, never site id or path
//! - Exporter failure is logged; serving continues without metrics

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUESTS_TOTAL: &str = "jinja_hub_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "jinja_hub_request_duration_seconds";
pub const SITES_ENABLED: &str = "jinja_hub_sites_enabled";

/// Install the global recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(REQUESTS_TOTAL, "route" => route, "status" => status.to_string())
        .increment(1);
    metrics::histogram!(REQUEST_DURATION_SECONDS, "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_enabled_sites(count: usize) {
    metrics::gauge!(SITES_ENABLED).set(count as f64);
}
