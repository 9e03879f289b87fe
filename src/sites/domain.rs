//! Custom domain → site mapping.
//!
//! # Responsibilities
//! - Build the domain table once from the registry
//! - Resolve a `Host` header to a site id
//!
//! # Design Decisions
//! - Enabled sites' `domains` lists are applied first, then the registry's
//!   `domain_mapping` table overrides them key by key
//! - Exact string match after stripping `:port`; no wildcards
//! - Immutable after construction, shared across requests without locks
//! - Targets are not validated here; the router re-checks them per request

use std::collections::HashMap;

use crate::sites::registry::SitesRegistry;

/// Read-only mapping from external host name to site id.
#[derive(Debug, Clone, Default)]
pub struct DomainResolver {
    domains: HashMap<String, String>,
}

impl DomainResolver {
    pub fn from_registry(registry: &SitesRegistry) -> Self {
        let mut domains: HashMap<String, String> = HashMap::new();

        for (site_id, site) in &registry.sites {
            if !site.enabled {
                continue;
            }
            for domain in &site.domains {
                if let Some(previous) = domains.insert(domain.clone(), site_id.clone()) {
                    tracing::warn!(
                        domain = %domain,
                        previous = %previous,
                        site = %site_id,
                        "Domain listed by more than one site; last one wins"
                    );
                }
            }
        }

        for (domain, site_id) in &registry.domain_mapping {
            domains.insert(domain.clone(), site_id.clone());
        }

        tracing::debug!(domains = domains.len(), "Domain map built");
        Self { domains }
    }

    /// Site id mapped to `host`, ignoring any `:port` suffix.
    pub fn resolve(&self, host: &str) -> Option<&str> {
        self.domains.get(strip_port(host)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Remove an optional trailing `:port` from a host header value.
///
/// Bracketed IPv6 literals keep their brackets: `[::1]:8080` → `[::1]`.
pub fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.split(':').next().unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(json: &str) -> SitesRegistry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("example.com:8080"), "example.com");
        assert_eq!(strip_port("example.com"), "example.com");
        assert_eq!(strip_port("[::1]:8080"), "[::1]");
        assert_eq!(strip_port("[::1]"), "[::1]");
        assert_eq!(strip_port(""), "");
    }

    #[test]
    fn test_site_domains_of_enabled_sites_only() {
        let resolver = DomainResolver::from_registry(&registry(
            r#"{"sites": {
                "foo": {"name": "Foo", "enabled": true, "domains": ["foo.com", "www.foo.com"]},
                "off": {"name": "Off", "enabled": false, "domains": ["off.com"]}
            }}"#,
        ));

        assert_eq!(resolver.resolve("foo.com"), Some("foo"));
        assert_eq!(resolver.resolve("www.foo.com"), Some("foo"));
        assert_eq!(resolver.resolve("off.com"), None);
        assert_eq!(resolver.len(), 2);
    }

    #[test]
    fn test_explicit_mapping_overrides_site_domains() {
        let resolver = DomainResolver::from_registry(&registry(
            r#"{
                "sites": {
                    "foo": {"name": "Foo", "enabled": true, "domains": ["x.com"]},
                    "bar": {"name": "Bar", "enabled": true}
                },
                "domain_mapping": {"x.com": "bar"}
            }"#,
        ));

        assert_eq!(resolver.resolve("x.com"), Some("bar"));
    }

    #[test]
    fn test_port_is_ignored() {
        let resolver = DomainResolver::from_registry(&registry(
            r#"{"sites": {}, "domain_mapping": {"example.com": "foo"}}"#,
        ));

        assert_eq!(resolver.resolve("example.com:8080"), Some("foo"));
        assert_eq!(resolver.resolve("example.com"), Some("foo"));
    }

    #[test]
    fn test_exact_match_only() {
        let resolver = DomainResolver::from_registry(&registry(
            r#"{"sites": {}, "domain_mapping": {"example.com": "foo"}}"#,
        ));

        assert_eq!(resolver.resolve("www.example.com"), None);
        assert_eq!(resolver.resolve("EXAMPLE.COM"), None);
        assert_eq!(resolver.resolve("ample.com"), None);
    }

    #[test]
    fn test_mapping_to_missing_site_is_kept() {
        let resolver = DomainResolver::from_registry(&registry(
            r#"{"sites": {}, "domain_mapping": {"ghost.com": "ghost"}}"#,
        ));

        assert_eq!(resolver.resolve("ghost.com"), Some("ghost"));
    }
}
