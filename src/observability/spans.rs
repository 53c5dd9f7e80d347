//! Request spans for the HTTP trace layer.

use axum::body::Body;
use axum::http::Request;
use tracing::Span;

use crate::http::request::RequestIdExt;

/// One span per inbound request, tagged with its request ID.
pub fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request.request_id(),
        method = %request.method(),
        path = %request.uri().path(),
    )
}
