//! Multi-tenant site resolution.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     sites.json
//!     → store.rs (ConfigStore: parse registry, fatal on failure)
//!     → domain.rs (DomainResolver: domain → site id table)
//!     → shared via Arc, read-only afterwards
//!
//! Per request:
//!     site id
//!     → site.rs (SiteResolver: exists + enabled, resource paths)
//!     → store.rs (fresh read of <site>/config.json)
//!     → page.rs (PageResolver: template lookup, render context)
//!     → listing.rs (sorted pages_array / all_sites)
//! ```
//!
//! # Design Decisions
//! - Registry and domain table are immutable values, never globals
//! - Every unmet precondition is a `SiteError`, mostly mapping to 404
//! - Listings are totally ordered by `(order, id)`

pub mod domain;
pub mod error;
pub mod listing;
pub mod page;
pub mod registry;
pub mod site;
pub mod store;

pub use domain::DomainResolver;
pub use error::SiteError;
pub use page::{PageResolver, RenderContext, ResolvedHome, ResolvedPage, TemplateRef};
pub use registry::{Platform, SiteEntry, SitesRegistry};
pub use site::{SitePaths, SiteResolver};
pub use store::{ConfigStore, SiteConfig, StoreError};
