//! Logging middleware for request/response tracing.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, info, info_span};

use super::RequestId;

/// Logs each request and its response inside an `http_request` span.
///
/// Request: method, path and request id. Response: status and duration in
/// milliseconds. Runs inside the request-id middleware.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let span = info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id
    );

    async move {
        info!(method = %method, path = %path, "Request received");

        let start = Instant::now();
        let response = next.run(request).await;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            status = response.status().as_u16(),
            duration_ms,
            "Response sent"
        );

        response
    }
    .instrument(span)
    .await
}
