//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the sites registry and build the shared resolvers
//! - Assemble the router in its fixed matcher order
//! - Announce the platform and every enabled site
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Everything built here is immutable and shared via `Arc`
//! - Listeners are bound by the caller, after bootstrap succeeds

use std::sync::Arc;

use thiserror::Error;

use crate::config::{ConfigError, SitesConfig};
use crate::net::{BindAddress, ListenerError};
use crate::observability::{self, LoggingError};
use crate::routing::SiteRouter;
use crate::sites::{ConfigStore, DomainResolver, PageResolver, SiteResolver, StoreError};

/// Any failure that prevents the host from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("sites registry: {0}")]
    Store(#[from] StoreError),

    #[error("host config: {0}")]
    Config(#[from] ConfigError),

    #[error("listener: {0}")]
    Listener(#[from] ListenerError),

    #[error("logging: {0}")]
    Logging(#[from] LoggingError),
}

/// Shared, read-only state of a running host.
#[derive(Debug, Clone)]
pub struct SiteHost {
    pub store: Arc<ConfigStore>,
    pub domains: Arc<DomainResolver>,
    pub pages: Arc<PageResolver>,
    pub router: Arc<SiteRouter>,
}

impl SiteHost {
    /// Wire resolvers and router around an already loaded store.
    pub fn from_store(store: ConfigStore) -> Self {
        let store = Arc::new(store);
        let domains = Arc::new(DomainResolver::from_registry(store.registry()));
        let pages = Arc::new(PageResolver::new(SiteResolver::new(store.clone())));
        let router = Arc::new(SiteRouter::new(store.clone(), domains.clone()));
        Self {
            store,
            domains,
            pages,
            router,
        }
    }

    /// Log the platform banner for a host listening on `addr`.
    pub fn announce(&self, addr: &BindAddress) {
        let registry = self.store.registry();
        let platform = registry.platform();
        let port = addr.port();

        tracing::info!(
            platform = %platform.name,
            address = %addr,
            home = %format!("http://localhost:{port}/"),
            "Platform starting"
        );

        for (site_id, site) in registry.enabled_sites() {
            tracing::info!(
                site = %site_id,
                name = %site.name,
                url = %format!("http://localhost:{port}/{site_id}/"),
                domains = ?site.domains,
                "Site enabled"
            );
        }
    }
}

/// Load the registry under `config.root` and build the host.
pub fn bootstrap(config: &SitesConfig) -> Result<SiteHost, StartupError> {
    let store = ConfigStore::load(&config.root, &config.registry_file)?;
    let host = SiteHost::from_store(store);

    let enabled = host.store.registry().enabled_sites().count();
    observability::metrics::record_enabled_sites(enabled);
    tracing::info!(
        root = %config.root.display(),
        sites = host.store.registry().sites.len(),
        enabled,
        domains = host.domains.len(),
        "Sites loaded"
    );
    Ok(host)
}
