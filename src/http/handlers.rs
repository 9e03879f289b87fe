//! Target handlers.
//!
//! # Responsibilities
//! - Render site pages and the platform home page
//! - Serve the raw site config document
//! - Serve static assets from a site's static root
//! - Serve proxied CDN files
//!
//! # Design Decisions
//! - Resolution and rendering read files synchronously, so they run on the
//!   blocking pool
//! - Static files go through `ServeDir`, which confines lookups to the
//!   static root and handles MIME types and conditional requests

use axum::body::Body;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{Request, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use tokio::task::JoinError;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::cdn;
use crate::http::response::not_found;
use crate::http::server::AppState;
use crate::render::render_with;
use crate::sites::{SiteConfig, SiteError};

/// Render `page` of `site` mounted under `base_path`.
pub async fn page(state: &AppState, site: String, page: String, base_path: String) -> Response {
    let pages = state.pages.clone();
    let renderer = state.renderer.clone();

    let result = tokio::task::spawn_blocking(move || -> Result<String, SiteError> {
        let resolved = pages.resolve_page(&site, &page, &base_path)?;
        Ok(render_with(
            renderer.as_ref(),
            &resolved.template,
            &resolved.context,
        )?)
    })
    .await;

    html(result)
}

/// Render the platform home page from the home site's templates.
pub async fn home(state: &AppState) -> Response {
    let pages = state.pages.clone();
    let renderer = state.renderer.clone();

    let result = tokio::task::spawn_blocking(move || -> Result<String, SiteError> {
        let resolved = pages.resolve_home()?;
        Ok(render_with(
            renderer.as_ref(),
            &resolved.template,
            &resolved.context,
        )?)
    })
    .await;

    html(result)
}

/// The site's config document exactly as stored on disk.
pub async fn config_api(state: &AppState, site: String) -> Response {
    let pages = state.pages.clone();

    let result = tokio::task::spawn_blocking(move || -> Result<SiteConfig, SiteError> {
        let sites = pages.sites();
        sites.resolve(&site)?;
        sites
            .store()
            .load_site_config(&site)
            .ok_or(SiteError::ConfigNotFound(site))
    })
    .await;

    match result {
        Ok(Ok(config)) => Json(config).into_response(),
        Ok(Err(e)) => e.into_response(),
        Err(e) => task_failed(e),
    }
}

/// Serve `asset` (a path relative to the static root, still URL-encoded).
pub async fn static_asset(
    state: &AppState,
    site: String,
    asset: String,
    request: Request<Body>,
) -> Response {
    let sites = state.pages.sites();
    if let Err(e) = sites.resolve(&site) {
        return e.into_response();
    }

    let static_root = sites.resource_paths(&site).static_root;
    if !static_root.is_dir() {
        return SiteError::StaticRootNotFound(site).into_response();
    }
    if asset.ends_with('/') {
        return SiteError::AssetNotFound(asset).into_response();
    }

    let (mut parts, body) = request.into_parts();
    parts.uri = match Uri::try_from(format!("/{asset}")) {
        Ok(uri) => uri,
        Err(_) => return SiteError::AssetNotFound(asset).into_response(),
    };

    let service = ServeDir::new(static_root).append_index_html_on_directories(false);
    let response = match service.oneshot(Request::from_parts(parts, body)).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    };

    if response.status() == StatusCode::NOT_FOUND {
        return SiteError::AssetNotFound(asset).into_response();
    }
    response
}

/// Serve `path` (decoded, relative to `/cdn/`) through the caching proxy.
pub async fn cdn(state: &AppState, path: String) -> Response {
    let Some(proxy) = state.cdn.as_ref() else {
        return not_found();
    };

    match proxy.get(&path).await {
        Ok(asset) => (
            [(CONTENT_TYPE, asset.content_type)],
            [(CACHE_CONTROL, cdn::CACHE_CONTROL)],
            asset.body,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

fn html(result: Result<Result<String, SiteError>, JoinError>) -> Response {
    match result {
        Ok(Ok(body)) => Html(body).into_response(),
        Ok(Err(e)) => e.into_response(),
        Err(e) => task_failed(e),
    }
}

fn task_failed(e: JoinError) -> Response {
    tracing::error!(error = %e, "Blocking task failed");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
