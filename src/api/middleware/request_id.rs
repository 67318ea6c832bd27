//! Request ID middleware for request tracing.
//!
//! Every request gets an identifier, taken from the `x-request-id` header or
//! generated as a UUID v4. It is echoed on the response and available to
//! error responses produced while the request is handled.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID stored in request extensions for downstream access.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

tokio::task_local! {
    static CURRENT_REQUEST_ID: RequestId;
}

/// The id of the request being handled on this task, if any.
pub fn current_request_id() -> Option<String> {
    CURRENT_REQUEST_ID.try_with(|id| id.0.clone()).ok()
}

/// Middleware that ensures every request has a unique request ID.
///
/// - Uses the incoming `x-request-id` header when it is valid text
/// - Otherwise generates a new UUID v4
/// - Stores the id in request extensions and echoes it on the response
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let id = RequestId(request_id.clone());
    request.extensions_mut().insert(id.clone());

    let mut response = CURRENT_REQUEST_ID.scope(id, next.run(request)).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}
