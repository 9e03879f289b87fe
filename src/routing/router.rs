//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Resolve the request host to a mapped site, if any
//! - Evaluate matchers in order and return the first target
//! - Return an explicit `NotFound` rather than a silent default
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) host lookup via the domain table
//! - O(n) matcher scan over a short, fixed list
//! - The CDN proxy is checked before host mapping; it is shared by every host
//! - Domain-mapped matchers come next, so a mapped host never reaches the
//!   path-addressed routes
//! - Paths are percent-decoded once here; a path that does not decode to
//!   UTF-8 is not found

use std::sync::Arc;

use percent_encoding::percent_decode_str;

use crate::routing::matcher::{
    CdnMatcher, DomainConfigApiMatcher, DomainFallbackMatcher, DomainIndexMatcher, DomainPageMatcher,
    DomainStaticMatcher, HomeMatcher, MappedSiteGuard, Matcher, RouteRequest,
    SiteConfigApiMatcher, SiteIndexMatcher, SitePageMatcher, SiteStaticMatcher, Target,
};
use crate::sites::{ConfigStore, DomainResolver};

/// Maps (host, path) to a dispatch target.
#[derive(Debug)]
pub struct SiteRouter {
    domains: Arc<DomainResolver>,
    matchers: Vec<Box<dyn Matcher>>,
}

impl SiteRouter {
    /// Router with the standard matcher order.
    pub fn new(store: Arc<ConfigStore>, domains: Arc<DomainResolver>) -> Self {
        let matchers: Vec<Box<dyn Matcher>> = vec![
            Box::new(CdnMatcher),
            Box::new(MappedSiteGuard::new(store)),
            Box::new(DomainStaticMatcher),
            Box::new(DomainConfigApiMatcher),
            Box::new(DomainIndexMatcher),
            Box::new(DomainPageMatcher),
            Box::new(DomainFallbackMatcher),
            Box::new(HomeMatcher),
            Box::new(SiteStaticMatcher),
            Box::new(SiteConfigApiMatcher),
            Box::new(SiteIndexMatcher),
            Box::new(SitePageMatcher),
        ];
        Self::with_matchers(domains, matchers)
    }

    pub fn with_matchers(domains: Arc<DomainResolver>, matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { domains, matchers }
    }

    pub fn domains(&self) -> &DomainResolver {
        &self.domains
    }

    /// Route a request. `host` is the raw `Host` value, port included;
    /// `path` is the raw, still percent-encoded request path.
    pub fn route(&self, host: Option<&str>, path: &str) -> Target {
        let mapped_site = host.and_then(|h| self.domains.resolve(h));

        let target = match percent_decode_str(path).decode_utf8() {
            Ok(decoded) => {
                let req = RouteRequest {
                    path: &decoded,
                    raw_path: path,
                    mapped_site,
                };
                self.matchers
                    .iter()
                    .find_map(|m| m.matches(&req))
                    .unwrap_or(Target::NotFound)
            }
            Err(_) => Target::NotFound,
        };

        tracing::trace!(
            host = host.unwrap_or(""),
            path = %path,
            mapped_site = mapped_site.unwrap_or(""),
            target = target.kind(),
            "Route resolved"
        );
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::SitesRegistry;

    fn router() -> SiteRouter {
        let registry: SitesRegistry = serde_json::from_str(
            r#"{
                "sites": {
                    "foo": {"name": "Foo", "enabled": true, "domains": ["foo.example.com"]},
                    "off": {"name": "Off", "enabled": false},
                    "bar": {"name": "Bar", "enabled": true}
                },
                "domain_mapping": {
                    "off.example.com": "off",
                    "ghost.example.com": "ghost",
                    "bar.example.com": "bar"
                }
            }"#,
        )
        .unwrap();
        let domains = Arc::new(DomainResolver::from_registry(&registry));
        let store = Arc::new(ConfigStore::from_registry("/srv/sites", registry));
        SiteRouter::new(store, domains)
    }

    fn page(site: &str, page: &str, base: &str) -> Target {
        Target::Page {
            site: site.into(),
            page: page.into(),
            base_path: base.into(),
        }
    }

    #[test]
    fn test_home_on_unmapped_host() {
        let router = router();
        assert_eq!(router.route(Some("localhost:8080"), "/"), Target::Home);
        assert_eq!(router.route(None, "/"), Target::Home);
    }

    #[test]
    fn test_path_addressed_routes() {
        let router = router();
        assert_eq!(router.route(None, "/foo"), page("foo", "login", "/foo"));
        assert_eq!(router.route(None, "/foo/"), page("foo", "login", "/foo"));
        assert_eq!(router.route(None, "/foo/index.html"), page("foo", "login", "/foo"));
        assert_eq!(router.route(None, "/foo/ecs.html"), page("foo", "ecs", "/foo"));
        assert_eq!(
            router.route(None, "/foo/api/config"),
            Target::ConfigApi { site: "foo".into() }
        );
        assert_eq!(
            router.route(None, "/foo/static/app.js"),
            Target::Static {
                site: "foo".into(),
                asset: "app.js".into()
            }
        );
        assert_eq!(router.route(None, "/foo/a/b.html"), Target::NotFound);
        assert_eq!(router.route(None, "/foo/ecs"), Target::NotFound);
    }

    #[test]
    fn test_mapped_host_routes_with_root_base() {
        let router = router();
        let host = Some("foo.example.com:443");
        assert_eq!(router.route(host, "/"), page("foo", "login", "/"));
        assert_eq!(router.route(host, "/index.html"), page("foo", "login", "/"));
        assert_eq!(router.route(host, "/ecs.html"), page("foo", "ecs", "/"));
        assert_eq!(router.route(host, "/api/config"), Target::ConfigApi { site: "foo".into() });
        assert_eq!(
            router.route(host, "/static/css/a.css"),
            Target::Static {
                site: "foo".into(),
                asset: "css/a.css".into()
            }
        );
    }

    #[test]
    fn test_mapped_host_unmatched_path_is_not_found() {
        let router = router();
        let host = Some("foo.example.com");
        assert_eq!(router.route(host, "/bar/ecs.html"), Target::NotFound);
        assert_eq!(router.route(host, "/bar"), Target::NotFound);
    }

    #[test]
    fn test_mapping_override_is_used() {
        let router = router();
        assert_eq!(
            router.route(Some("bar.example.com"), "/"),
            page("bar", "login", "/")
        );
    }

    #[test]
    fn test_mapped_host_to_disabled_or_unknown_site() {
        let router = router();
        for host in ["off.example.com", "ghost.example.com"] {
            assert_eq!(router.route(Some(host), "/"), Target::NotFound);
            assert_eq!(router.route(Some(host), "/static/a.js"), Target::NotFound);
            assert_eq!(router.route(Some(host), "/api/config"), Target::NotFound);
        }
    }

    #[test]
    fn test_encoded_paths_are_decoded() {
        let router = router();
        assert_eq!(
            router.route(None, "/foo/%E5%AE%9E%E4%BE%8B.html"),
            page("foo", "实例", "/foo")
        );
        assert_eq!(
            router.route(Some("foo.example.com"), "/%E5%AE%9E%E4%BE%8B.html"),
            page("foo", "实例", "/")
        );
        assert_eq!(router.route(None, "/%66oo/ecs.html"), page("foo", "ecs", "/foo"));
    }

    #[test]
    fn test_invalid_utf8_path_is_not_found() {
        let router = router();
        assert_eq!(router.route(None, "/foo/%FF.html"), Target::NotFound);
        assert_eq!(router.route(Some("foo.example.com"), "/%C3.html"), Target::NotFound);
    }

    #[test]
    fn test_cdn_precedes_host_mapping() {
        let router = router();
        let cdn = Target::Cdn {
            path: "npm/x@1/x.js".into(),
        };
        assert_eq!(router.route(None, "/cdn/npm/x@1/x.js"), cdn);
        assert_eq!(router.route(Some("foo.example.com"), "/cdn/npm/x@1/x.js"), cdn);
        assert_eq!(router.route(Some("ghost.example.com"), "/cdn/npm/x@1/x.js"), cdn);
    }

    #[test]
    fn test_host_match_is_exact() {
        let router = router();
        assert_eq!(router.route(Some("www.foo.example.com"), "/"), Target::Home);
    }
}
