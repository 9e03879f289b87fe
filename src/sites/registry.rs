//! Sites registry schema.
//!
//! The registry is the platform-wide document (`sites.json`) listing every
//! hosted site, the platform metadata and the custom domain table. It is
//! parsed once at startup and never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Site served at `/` when no domain mapping claims the host.
pub const DEFAULT_HOME_SITE: &str = "_home";

/// Platform name used when the registry omits `platform`.
pub const DEFAULT_PLATFORM_NAME: &str = "Jinja Hub";

/// Platform description used when the registry omits `platform`.
pub const DEFAULT_PLATFORM_DESCRIPTION: &str = "Open front-end development platform";

/// Root registry document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SitesRegistry {
    /// Platform metadata exposed to every template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    /// Site whose templates render the platform home page.
    #[serde(default = "default_home_site")]
    pub home_site: String,

    /// Every hosted site keyed by site id.
    #[serde(default)]
    pub sites: BTreeMap<String, SiteEntry>,

    /// Explicit external domain → site id table. Wins over `SiteEntry::domains`.
    #[serde(default)]
    pub domain_mapping: BTreeMap<String, String>,
}

fn default_home_site() -> String {
    DEFAULT_HOME_SITE.to_string()
}

impl SitesRegistry {
    /// Look up a site entry by id, enabled or not.
    pub fn site(&self, site_id: &str) -> Option<&SiteEntry> {
        self.sites.get(site_id)
    }

    /// Platform metadata, falling back to the built-in defaults.
    pub fn platform(&self) -> Platform {
        self.platform.clone().unwrap_or_default()
    }

    /// Enabled sites in listing order.
    pub fn enabled_sites(&self) -> impl Iterator<Item = (&str, &SiteEntry)> {
        crate::sites::listing::sorted_sites(self)
            .into_iter()
            .filter(|(_, entry)| entry.enabled)
    }
}

/// Platform metadata block.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Platform {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Any further keys (version, links, ...) passed through to templates.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLATFORM_NAME.to_string(),
            description: DEFAULT_PLATFORM_DESCRIPTION.to_string(),
            extra: Map::new(),
        }
    }
}

/// One hosted site as declared in the registry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SiteEntry {
    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Only enabled sites are reachable.
    #[serde(default)]
    pub enabled: bool,

    /// Listing position; ties are broken by site id. Read leniently, see
    /// [`order_of`].
    #[serde(default, deserialize_with = "lenient_order")]
    pub order: i64,

    /// External domains served by this site.
    #[serde(default)]
    pub domains: Vec<String>,

    /// Free-form keys (description, icon, category, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Integer value of an `order` key: integers as is, other numbers
/// truncated, anything else 0.
pub fn order_of(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .unwrap_or(0)
}

fn lenient_order<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| order_of(&value))
}
