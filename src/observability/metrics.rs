//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): handled requests by method, status
//! - `http_request_duration_seconds` (histogram): inbound latency
//! - `upstream_requests_total` (counter): outbound calls by service, outcome
//! - `upstream_request_duration_seconds` (histogram): outbound latency

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter, listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "failed to install metrics exporter"),
    }
}

/// Middleware recording a counter and latency histogram per handled request.
pub async fn track_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "status" => status.clone()
    )
    .increment(1);
    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Record one outbound call to a downstream service.
pub fn record_upstream(service: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "upstream_requests_total",
        "service" => service,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "upstream_request_duration_seconds",
        "service" => service,
        "outcome" => outcome
    )
    .record(start.elapsed().as_secs_f64());
}
