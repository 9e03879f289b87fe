//! Request and concurrency limits.
//!
//! # Responsibilities
//! - Enforce maximum request body size (413 Payload Too Large)
//! - Bound the number of requests processed at once
//!
//! # Design Decisions
//! - The concurrency limit is global across connections and applies
//!   backpressure instead of rejecting
//! - Handlers never read bodies, so the body limit only guards the transport

use axum::Router;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;

/// Wrap `router` with the body size and concurrency limits.
pub fn apply(router: Router, max_body_size: usize, max_concurrent: usize) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(GlobalConcurrencyLimitLayer::new(max_concurrent))
}
