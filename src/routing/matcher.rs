//! Route matching logic.
//!
//! # Responsibilities
//! - Turn a (mapped site, path) pair into a dispatch [`Target`]
//! - One matcher per URL shape, evaluated in the router's fixed order
//!
//! # Design Decisions
//! - Domain matchers only fire when the host is mapped to a site
//! - Path matching is case-sensitive and exact; no regex
//! - A matcher returning `Some(Target::NotFound)` stops evaluation
//! - Site existence is not checked here except by [`MappedSiteGuard`];
//!   handlers validate path-addressed sites themselves

use std::sync::Arc;

use crate::sites::page::{site_base_path, DOMAIN_BASE_PATH, LOGIN_PAGE, TEMPLATE_EXTENSION};
use crate::sites::ConfigStore;

/// Path prefix of static assets within a site.
pub const STATIC_PREFIX: &str = "/static/";

/// Path of the raw site config endpoint within a site.
pub const CONFIG_API_PATH: &str = "/api/config";

/// Conventional index document.
pub const INDEX_FILE: &str = "index.html";

/// Path prefix of the CDN proxy.
pub const CDN_PREFIX: &str = "/cdn/";

/// Input to every matcher.
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest<'a> {
    /// Percent-decoded request path.
    pub path: &'a str,
    /// Request path as received; static assets are taken from here so the
    /// file server decodes them exactly once.
    pub raw_path: &'a str,
    /// Site id the host header is mapped to, if any.
    pub mapped_site: Option<&'a str>,
}

/// What the request should be dispatched to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Platform home page.
    Home,
    /// Rendered site page.
    Page {
        site: String,
        page: String,
        base_path: String,
    },
    /// Raw site config document.
    ConfigApi { site: String },
    /// File from the site's static directory. `asset` is still percent-encoded.
    Static { site: String, asset: String },
    /// Cached CDN proxy. An empty `path` is a bad request.
    Cdn { path: String },
    /// Nothing to serve.
    NotFound,
}

impl Target {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Target::Home => "home",
            Target::Page { .. } => "page",
            Target::ConfigApi { .. } => "config_api",
            Target::Static { .. } => "static",
            Target::Cdn { .. } => "cdn",
            Target::NotFound => "not_found",
        }
    }

    fn page(site: &str, page: &str, base_path: impl Into<String>) -> Self {
        Target::Page {
            site: site.to_string(),
            page: page.to_string(),
            base_path: base_path.into(),
        }
    }
}

/// Trait for matching requests against one URL shape.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns the target if this matcher claims the request.
    fn matches(&self, req: &RouteRequest<'_>) -> Option<Target>;
}

/// `name.html` → `name`, for a single path segment.
fn html_page(segment: &str) -> Option<&str> {
    let stem = segment.strip_suffix(TEMPLATE_EXTENSION)?.strip_suffix('.')?;
    (!stem.is_empty()).then_some(stem)
}

// ---------------------------------------------------------------------------
// Host independent
// ---------------------------------------------------------------------------

/// `/cdn/{path}` on any host, mapped or not.
#[derive(Debug, Default)]
pub struct CdnMatcher;

impl Matcher for CdnMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> Option<Target> {
        let path = req.path.strip_prefix(CDN_PREFIX)?;
        Some(Target::Cdn {
            path: path.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Domain-mapped hosts
// ---------------------------------------------------------------------------

/// Rejects every request to a mapped host whose site is unknown or disabled.
#[derive(Debug)]
pub struct MappedSiteGuard {
    store: Arc<ConfigStore>,
}

impl MappedSiteGuard {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self { store }
    }
}

impl Matcher for MappedSiteGuard {
    fn matches(&self, req: &RouteRequest<'_>) -> Option<Target> {
        let site = req.mapped_site?;
        let reachable = self
            .store
            .registry()
            .site(site)
            .is_some_and(|entry| entry.enabled);
        (!reachable).then_some(Target::NotFound)
    }
}

/// `/static/{asset}` on a mapped host.
#[derive(Debug, Default)]
pub struct DomainStaticMatcher;

impl Matcher for DomainStaticMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> Option<Target> {
        let site = req.mapped_site?;
        let decoded = req.path.strip_prefix(STATIC_PREFIX)?;
        // An encoded `/static/` prefix decodes to a match but has no raw asset.
        match req.raw_path.strip_prefix(STATIC_PREFIX) {
            Some(asset) if !decoded.is_empty() => Some(Target::Static {
                site: site.to_string(),
                asset: asset.to_string(),
            }),
            _ => Some(Target::NotFound),
        }
    }
}

/// `/api/config` on a mapped host.
#[derive(Debug, Default)]
pub struct DomainConfigApiMatcher;

impl Matcher for DomainConfigApiMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> Option<Target> {
        let site = req.mapped_site?;
        (req.path == CONFIG_API_PATH).then(|| Target::ConfigApi {
            site: site.to_string(),
        })
    }
}

/// `/`, empty path and `/index.html` on a mapped host: the login page.
#[derive(Debug, Default)]
pub struct DomainIndexMatcher;

impl Matcher for DomainIndexMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> Option<Target> {
        let site = req.mapped_site?;
        let is_index = matches!(req.path, "" | "/") || req.path.strip_prefix('/') == Some(INDEX_FILE);
        is_index.then(|| Target::page(site, LOGIN_PAGE, DOMAIN_BASE_PATH))
    }
}

/// `/{page}.html` (exactly one segment) on a mapped host.
#[derive(Debug, Default)]
pub struct DomainPageMatcher;

impl Matcher for DomainPageMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> Option<Target> {
        let site = req.mapped_site?;
        let segment = req.path.strip_prefix('/')?;
        if segment.contains('/') {
            return None;
        }
        let page = html_page(segment)?;
        Some(Target::page(site, page, DOMAIN_BASE_PATH))
    }
}

/// Anything else on a mapped host is not found; the host owns its root.
#[derive(Debug, Default)]
pub struct DomainFallbackMatcher;

impl Matcher for DomainFallbackMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> Option<Target> {
        req.mapped_site.map(|_| Target::NotFound)
    }
}

// ---------------------------------------------------------------------------
// Path-addressed sites
// ---------------------------------------------------------------------------

/// Split `/{site}/{rest}` into `(site, rest)`; `rest` is `None` for `/{site}`.
fn site_segments(path: &str) -> Option<(&str, Option<&str>)> {
    let trimmed = path.strip_prefix('/')?;
    let (site, rest) = match trimmed.split_once('/') {
        Some((site, rest)) => (site, Some(rest)),
        None => (trimmed, None),
    };
    (!site.is_empty()).then_some((site, rest))
}

/// `/` on an unmapped host: the platform home page.
#[derive(Debug, Default)]
pub struct HomeMatcher;

impl Matcher for HomeMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> Option<Target> {
        matches!(req.path, "" | "/").then_some(Target::Home)
    }
}

/// `/{site}/static/{asset}`.
#[derive(Debug, Default)]
pub struct SiteStaticMatcher;

impl Matcher for SiteStaticMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> Option<Target> {
        let (site, rest) = site_segments(req.path)?;
        let decoded = rest?.strip_prefix(&STATIC_PREFIX[1..])?;
        let raw = site_segments(req.raw_path)
            .and_then(|(_, rest)| rest)
            .and_then(|rest| rest.strip_prefix(&STATIC_PREFIX[1..]));
        match raw {
            Some(asset) if !decoded.is_empty() => Some(Target::Static {
                site: site.to_string(),
                asset: asset.to_string(),
            }),
            _ => Some(Target::NotFound),
        }
    }
}

/// `/{site}/api/config`.
#[derive(Debug, Default)]
pub struct SiteConfigApiMatcher;

impl Matcher for SiteConfigApiMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> Option<Target> {
        let (site, rest) = site_segments(req.path)?;
        (rest? == &CONFIG_API_PATH[1..]).then(|| Target::ConfigApi {
            site: site.to_string(),
        })
    }
}

/// `/{site}`, `/{site}/` and `/{site}/index.html`: the login page.
#[derive(Debug, Default)]
pub struct SiteIndexMatcher;

impl Matcher for SiteIndexMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> Option<Target> {
        let (site, rest) = site_segments(req.path)?;
        match rest {
            None | Some("") | Some(INDEX_FILE) => {
                Some(Target::page(site, LOGIN_PAGE, site_base_path(site)))
            }
            Some(_) => None,
        }
    }
}

/// `/{site}/{page}.html`.
#[derive(Debug, Default)]
pub struct SitePageMatcher;

impl Matcher for SitePageMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> Option<Target> {
        let (site, rest) = site_segments(req.path)?;
        let segment = rest?;
        if segment.contains('/') {
            return None;
        }
        let page = html_page(segment)?;
        Some(Target::page(site, page, site_base_path(site)))
    }
}
