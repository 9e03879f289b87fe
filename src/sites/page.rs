//! Page resolution and render context assembly.
//!
//! # Responsibilities
//! - Validate the site and load its config
//! - Map a page id to a template under `pages/`
//! - Assemble the context handed to the template engine
//!
//! # Design Decisions
//! - Page lookup is an exact key match; unknown ids still render when a
//!   template with the conventional name exists, with no page metadata
//! - `base_path` and `pages_array` are injected into a copy of the config
//!   for rendering only; the config API serves the document untouched
//! - Template existence is checked before the engine is involved so a
//!   missing page is a 404 rather than a render failure

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::sites::error::SiteError;
use crate::sites::listing::{self, HomeSiteListing, SiteListing};
use crate::sites::registry::{Platform, SiteEntry};
use crate::sites::site::SiteResolver;

/// Page rendered for `/` and `/index.html` of every site.
pub const LOGIN_PAGE: &str = "login";

/// Directory under the template root holding page templates.
pub const PAGES_DIR: &str = "pages";

/// File extension of page templates.
pub const TEMPLATE_EXTENSION: &str = "html";

/// Template rendered for the platform home page.
pub const HOME_TEMPLATE: &str = "index.html";

/// Base path of a site reached through its own domain.
pub const DOMAIN_BASE_PATH: &str = "/";

/// Base path of a site reached under its path prefix.
pub fn site_base_path(site_id: &str) -> String {
    format!("/{site_id}")
}

/// Conventional template name of a page: `pages/{page_id}.html`.
pub fn page_template(page_id: &str) -> String {
    format!("{PAGES_DIR}/{page_id}.{TEMPLATE_EXTENSION}")
}

/// A template to render: loader root plus name relative to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRef {
    pub root: PathBuf,
    pub name: String,
}

/// Context of a site page render.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    /// Site config with `base_path` and `pages_array` injected.
    pub config: Map<String, Value>,
    /// Matched page entry, `None` when rendered from a bare template.
    pub page: Option<Value>,
    pub site: SiteEntry,
    pub site_name: String,
    pub platform: Platform,
    pub all_sites: Vec<SiteListing>,
    pub base_path: String,
}

/// Context of the platform home page render.
#[derive(Debug, Clone, Serialize)]
pub struct HomeContext {
    pub platform: Platform,
    pub sites: Vec<HomeSiteListing>,
}

#[derive(Debug, Clone)]
pub struct ResolvedPage {
    pub template: TemplateRef,
    pub context: RenderContext,
}

#[derive(Debug, Clone)]
pub struct ResolvedHome {
    pub template: TemplateRef,
    pub context: HomeContext,
}

/// Builds render contexts for site pages and the home page.
#[derive(Debug, Clone)]
pub struct PageResolver {
    sites: SiteResolver,
}

impl PageResolver {
    pub fn new(sites: SiteResolver) -> Self {
        Self { sites }
    }

    pub fn sites(&self) -> &SiteResolver {
        &self.sites
    }

    /// Resolve `page_id` of `site_id` mounted under `base_path`.
    pub fn resolve_page(
        &self,
        site_id: &str,
        page_id: &str,
        base_path: &str,
    ) -> Result<ResolvedPage, SiteError> {
        let site = self.sites.resolve(site_id)?.clone();
        let store = self.sites.store();

        let config = store
            .load_site_config(site_id)
            .ok_or_else(|| SiteError::ConfigNotFound(site_id.to_string()))?;

        let paths = self.sites.resource_paths(site_id);
        if !paths.template_root.is_dir() {
            return Err(SiteError::TemplateNotFound(
                paths.template_root.display().to_string(),
            ));
        }

        let (template_name, page) = match config.page(page_id) {
            Some((key, entry)) => (page_template(key), Some(entry.clone())),
            None => (page_template(page_id), None),
        };

        if !paths.template_root.join(&template_name).is_file() {
            return Err(SiteError::TemplateNotFound(template_name));
        }

        tracing::debug!(
            site = %site_id,
            page = %page_id,
            template = %template_name,
            configured = page.is_some(),
            "Page resolved"
        );

        let pages_array = config.pages().map(listing::sorted_pages);
        let mut document = config.into_document();
        document.insert("base_path".to_string(), Value::String(base_path.to_string()));
        if let Some(pages_array) = pages_array {
            document.insert("pages_array".to_string(), to_value(&pages_array));
        }

        let registry = store.registry();
        Ok(ResolvedPage {
            template: TemplateRef {
                root: paths.template_root,
                name: template_name,
            },
            context: RenderContext {
                config: document,
                page,
                site,
                site_name: site_id.to_string(),
                platform: registry.platform(),
                all_sites: listing::site_listing(registry),
                base_path: base_path.to_string(),
            },
        })
    }

    /// Resolve the platform home page from the registry's home site.
    pub fn resolve_home(&self) -> Result<ResolvedHome, SiteError> {
        let registry = self.sites.store().registry();
        let template_root = self.sites.resource_paths(&registry.home_site).template_root;
        if !template_root.is_dir() {
            return Err(SiteError::HomeTemplateDirMissing(template_root));
        }

        Ok(ResolvedHome {
            template: TemplateRef {
                root: template_root,
                name: HOME_TEMPLATE.to_string(),
            },
            context: HomeContext {
                platform: registry.platform(),
                sites: listing::home_listing(registry),
            },
        })
    }
}

fn to_value<T: Serialize>(value: &T) -> Value {
    // Listings hold only strings and JSON values, which always serialize.
    serde_json::to_value(value).unwrap_or(Value::Null)
}
