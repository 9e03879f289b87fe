//! Request inspection helpers.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sent none
//! - Extract routing-relevant information (host, request ID)
//!
//! # Design Decisions
//! - Request ID added as early as possible so the trace span carries it
//! - Host comes from the `Host` header, falling back to the URI authority
//!   for HTTP/2 requests that only carry `:authority`

use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID in both directions.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates `x-request-id` values from random UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Accessors for request metadata set by the HTTP layers.
pub trait RequestIdExt {
    /// The request ID, if one was assigned or supplied.
    fn request_id(&self) -> Option<&str>;

    /// Host the request was addressed to, port included when present.
    fn request_host(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.headers()
            .get(&X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
    }

    fn request_host(&self) -> Option<&str> {
        self.headers()
            .get(axum::http::header::HOST)
            .and_then(|v| v.to_str().ok())
            .filter(|h| !h.is_empty())
            .or_else(|| self.uri().authority().map(|a| a.as_str()))
    }
}
