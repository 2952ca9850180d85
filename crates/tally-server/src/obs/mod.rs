//! In-process metrics and the request instrumentation middleware.
//!
//! Metrics are stored as atomics and rendered by the `/metrics` handler.

pub mod metrics;

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

pub use metrics::Metrics;

/// Path label for requests that hit no route.
pub const UNMATCHED_PATH: &str = "unmatched";

/// Records `requests_total` and `request_duration_seconds` for every request.
///
/// The path label is the matched route template. Unrouted requests all share
/// the `UNMATCHED_PATH` label so arbitrary URLs cannot create new series.
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());
    let method = req.method().as_str().to_string();

    let resp = next.run(req).await;

    let status = resp.status().as_u16();
    let metrics = state.metrics();
    metrics.record_request(&path, &method, status);
    metrics.record_latency(&path, &method, start.elapsed());
    tracing::debug!(%path, %method, status, "request handled");
    resp
}
