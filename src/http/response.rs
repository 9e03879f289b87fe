//! Response mapping.
//!
//! # Responsibilities
//! - Map `SiteError` to an HTTP status and a diagnostic body
//! - Map `CdnError` to an HTTP status and a fixed body
//! - Log failures at a level matching their severity
//!
//! # Design Decisions
//! - Not-found conditions are expected traffic and logged at debug
//! - Server errors carry the message too; sites are development content
//! - CDN failures keep upstream URLs and cache paths out of the body

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::cdn::CdnError;
use crate::sites::SiteError;

impl SiteError {
    /// 404 for every not-found condition, 500 otherwise.
    pub fn status(&self) -> StatusCode {
        if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Not found");
        }
        (status, self.to_string()).into_response()
    }
}

impl CdnError {
    /// 400 for bad paths, 502 when the upstream fails, 500 otherwise.
    pub fn status(&self) -> StatusCode {
        match self {
            CdnError::EmptyPath | CdnError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            CdnError::Fetch { .. } | CdnError::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
            CdnError::Cache { .. } | CdnError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CdnError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match status {
            StatusCode::BAD_REQUEST => "Bad request",
            StatusCode::BAD_GATEWAY => "Failed to fetch from CDN",
            _ => "Internal Server Error",
        };
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "CDN proxy failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Bad CDN path");
        }
        (status, body).into_response()
    }
}

/// Plain 404 for requests no route claims.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_status_mapping() {
        assert_eq!(SiteError::UnknownSite("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            SiteError::AssetNotFound("a.js".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SiteError::HomeTemplateDirMissing(PathBuf::from("/x")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_cdn_error_body_is_fixed() {
        let res = CdnError::UpstreamStatus {
            url: "https://cdn.jsdelivr.net/npm/x".into(),
            status: 404,
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Failed to fetch from CDN");

        assert_eq!(CdnError::EmptyPath.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CdnError::InvalidPath("../x".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_body_is_message() {
        let res = SiteError::SiteDisabled("aliyun".into()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"site aliyun is not enabled");
    }
}
