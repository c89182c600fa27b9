//! Prometheus metrics handler
//!
//! `GET /metrics` renders whatever the installed recorder has collected:
//! the HTTP counters from [`super::http_metrics_middleware`] and the
//! `celda_status_changes_total` counter bumped by the celda service.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusHandle;

/// Shared state for the metrics endpoint
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Register help text for every metric the service emits.
/// Call once after the recorder is installed.
pub fn describe_metrics() {
    describe_counter!(
        "http_requests_total",
        Unit::Count,
        "HTTP requests by method, matched path and status"
    );
    describe_histogram!(
        "http_request_duration_seconds",
        Unit::Seconds,
        "HTTP request latency by method and matched path"
    );
    describe_counter!(
        "celda_status_changes_total",
        Unit::Count,
        "Celda status updates by target estado"
    );
}

/// `GET /metrics`, no auth
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}
