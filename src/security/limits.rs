//! Inbound size limits.
//!
//! Bodies above `relay.max_body_size` are refused with 413 before the
//! handler runs.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

/// Cap request bodies at `max_bytes`.
pub fn with_body_limit<S>(router: Router<S>, max_bytes: usize) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(DefaultBodyLimit::max(max_bytes))
        .layer(RequestBodyLimitLayer::new(max_bytes))
}
