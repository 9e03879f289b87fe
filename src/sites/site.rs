//! Site validation and on-disk layout.

use std::path::PathBuf;
use std::sync::Arc;

use crate::sites::error::SiteError;
use crate::sites::registry::SiteEntry;
use crate::sites::store::{ConfigStore, SITE_CONFIG_FILE};

/// Template directory name inside a site.
pub const TEMPLATES_DIR: &str = "templates";

/// Static asset directory name inside a site.
pub const STATIC_DIR: &str = "static";

/// Resource locations of one site. Existence is not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    pub template_root: PathBuf,
    pub static_root: PathBuf,
    pub config_path: PathBuf,
}

/// Validates site ids against the registry.
#[derive(Debug, Clone)]
pub struct SiteResolver {
    store: Arc<ConfigStore>,
}

impl SiteResolver {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Registry entry of a reachable site.
    ///
    /// Unknown ids and disabled sites both fail.
    pub fn resolve(&self, site_id: &str) -> Result<&SiteEntry, SiteError> {
        let entry = self
            .store
            .registry()
            .site(site_id)
            .ok_or_else(|| SiteError::UnknownSite(site_id.to_string()))?;

        if !entry.enabled {
            return Err(SiteError::SiteDisabled(site_id.to_string()));
        }
        Ok(entry)
    }

    pub fn resource_paths(&self, site_id: &str) -> SitePaths {
        let site_dir = self.store.site_dir(site_id);
        SitePaths {
            template_root: site_dir.join(TEMPLATES_DIR),
            static_root: site_dir.join(STATIC_DIR),
            config_path: site_dir.join(SITE_CONFIG_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn resolver() -> SiteResolver {
        let registry = serde_json::from_str(
            r#"{"sites": {
                "on": {"name": "On", "enabled": true},
                "off": {"name": "Off", "enabled": false},
                "implicit": {"name": "Implicit"}
            }}"#,
        )
        .unwrap();
        SiteResolver::new(Arc::new(ConfigStore::from_registry("/srv/sites", registry)))
    }

    #[test]
    fn test_resolve_enabled_site() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("on").unwrap().name, "On");
    }

    #[test]
    fn test_resolve_rejects_unknown_and_disabled() {
        let resolver = resolver();
        assert!(matches!(resolver.resolve("nope"), Err(SiteError::UnknownSite(_))));
        assert!(matches!(resolver.resolve("off"), Err(SiteError::SiteDisabled(_))));
        assert!(matches!(resolver.resolve("implicit"), Err(SiteError::SiteDisabled(_))));
    }

    #[test]
    fn test_resource_paths() {
        let paths = resolver().resource_paths("on");
        assert_eq!(paths.template_root, Path::new("/srv/sites/on/templates"));
        assert_eq!(paths.static_root, Path::new("/srv/sites/on/static"));
        assert_eq!(paths.config_path, Path::new("/srv/sites/on/config.json"));
    }

    #[test]
    fn test_resource_paths_do_not_require_registry_entry() {
        let paths = resolver().resource_paths("anything");
        assert_eq!(paths.static_root, Path::new("/srv/sites/anything/static"));
    }
}
