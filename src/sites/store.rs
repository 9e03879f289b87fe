//! Registry and per-site configuration access.
//!
//! # Responsibilities
//! - Load the sites registry once at startup (fatal on failure)
//! - Read a site's `config.json` fresh on every call
//!
//! # Design Decisions
//! - No caching of site configs: edits are visible without a restart
//! - A missing or malformed site config is reported as absent, never as a crash
//! - Filesystem reads only, no writes

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::sites::registry::SitesRegistry;

/// File name of the per-site config document.
pub const SITE_CONFIG_FILE: &str = "config.json";

/// Error loading the sites registry.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read registry {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse registry {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Owner of the immutable registry and the sites directory.
#[derive(Debug)]
pub struct ConfigStore {
    root: PathBuf,
    registry: SitesRegistry,
}

impl ConfigStore {
    /// Read and parse `<root>/<registry_file>`.
    pub fn load(root: impl Into<PathBuf>, registry_file: &str) -> Result<Self, StoreError> {
        let root = root.into();
        let path = root.join(registry_file);
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let registry: SitesRegistry =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?;

        tracing::info!(
            path = %path.display(),
            sites = registry.sites.len(),
            domain_mappings = registry.domain_mapping.len(),
            "Sites registry loaded"
        );

        Ok(Self { root, registry })
    }

    /// Build a store from an already parsed registry.
    pub fn from_registry(root: impl Into<PathBuf>, registry: SitesRegistry) -> Self {
        Self {
            root: root.into(),
            registry,
        }
    }

    pub fn registry(&self) -> &SitesRegistry {
        &self.registry
    }

    /// Directory holding one subdirectory per site.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a single site. Pure path computation.
    pub fn site_dir(&self, site_id: &str) -> PathBuf {
        self.root.join(site_id)
    }

    /// Read the site's config document from disk.
    ///
    /// Returns `None` when the file is missing, unreadable, not JSON, or not
    /// a JSON object.
    pub fn load_site_config(&self, site_id: &str) -> Option<SiteConfig> {
        let path = self.site_dir(site_id).join(SITE_CONFIG_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(site = %site_id, path = %path.display(), "Site config missing");
                return None;
            }
            Err(e) => {
                tracing::warn!(site = %site_id, path = %path.display(), error = %e, "Failed to read site config");
                return None;
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(document)) => Some(SiteConfig::new(document)),
            Ok(_) => {
                tracing::warn!(site = %site_id, path = %path.display(), "Site config is not a JSON object");
                None
            }
            Err(e) => {
                tracing::warn!(site = %site_id, path = %path.display(), error = %e, "Failed to parse site config");
                None
            }
        }
    }
}

/// A site's free-form config document.
///
/// Only `pages` is interpreted; every other key is passed through untouched.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct SiteConfig {
    document: Map<String, Value>,
}

impl SiteConfig {
    pub fn new(document: Map<String, Value>) -> Self {
        Self { document }
    }

    /// The document exactly as read from disk.
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    pub fn into_document(self) -> Map<String, Value> {
        self.document
    }

    /// The `pages` table, when present and an object.
    pub fn pages(&self) -> Option<&Map<String, Value>> {
        self.document.get("pages").and_then(Value::as_object)
    }

    /// Page entry whose key equals `page_id` exactly.
    pub fn page(&self, page_id: &str) -> Option<(&String, &Value)> {
        self.pages()?.get_key_value(page_id)
    }
}
