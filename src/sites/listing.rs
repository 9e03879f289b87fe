//! Sorted site and page listings exposed to templates.
//!
//! Every listing is ordered by `(order ascending, id ascending)`, which is a
//! total order even when most entries keep the default order of 0.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::sites::registry::{order_of, SiteEntry, SitesRegistry};

/// Entry of `all_sites` in a page render context.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SiteListing {
    pub id: String,
    pub info: SiteEntry,
}

/// Entry of `sites` in the home page render context.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HomeSiteListing {
    pub name: String,
    pub info: SiteEntry,
}

/// Entry of `config.pages_array`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageListing {
    pub key: String,
    pub value: Value,
}

/// All registry sites, enabled or not, in listing order.
pub fn sorted_sites(registry: &SitesRegistry) -> Vec<(&str, &SiteEntry)> {
    let mut sites: Vec<(&str, &SiteEntry)> = registry
        .sites
        .iter()
        .map(|(id, entry)| (id.as_str(), entry))
        .collect();
    sites.sort_by(|(a_id, a), (b_id, b)| a.order.cmp(&b.order).then_with(|| a_id.cmp(b_id)));
    sites
}

/// `all_sites` listing for page contexts.
pub fn site_listing(registry: &SitesRegistry) -> Vec<SiteListing> {
    sorted_sites(registry)
        .into_iter()
        .map(|(id, info)| SiteListing {
            id: id.to_string(),
            info: info.clone(),
        })
        .collect()
}

/// `sites` listing for the home page context.
pub fn home_listing(registry: &SitesRegistry) -> Vec<HomeSiteListing> {
    sorted_sites(registry)
        .into_iter()
        .map(|(id, info)| HomeSiteListing {
            name: id.to_string(),
            info: info.clone(),
        })
        .collect()
}

/// Sort a site config's `pages` table into `pages_array`.
///
/// Entries whose value is not an object carry no metadata worth listing and
/// are skipped.
pub fn sorted_pages(pages: &Map<String, Value>) -> Vec<PageListing> {
    let mut listing: Vec<(i64, &String, &Value)> = pages
        .iter()
        .filter(|(_, value)| value.is_object())
        .map(|(key, value)| (page_order(value), key, value))
        .collect();
    listing.sort_by(|(a_order, a_key, _), (b_order, b_key, _)| {
        a_order.cmp(b_order).then_with(|| a_key.cmp(b_key))
    });

    listing
        .into_iter()
        .map(|(_, key, value)| PageListing {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}

/// `order` of a page entry; missing or non-numeric means 0, fractions truncate.
pub fn page_order(entry: &Value) -> i64 {
    entry.get("order").map_or(0, order_of)
}
