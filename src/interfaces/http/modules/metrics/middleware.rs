//! HTTP request metrics middleware
//!
//! Installed with `route_layer`, so it only sees requests that matched a
//! route and the `path` label is the route template (`/api/v1/celdas/{id}`),
//! never the raw URI.

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

const SCRAPE_PATH: &str = "/metrics";

pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let Some(path) = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_owned())
    else {
        return next.run(request).await;
    };
    if path == SCRAPE_PATH {
        return next.run(request).await;
    }
    let method = request.method().to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(elapsed);

    response
}
