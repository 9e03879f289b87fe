//! Cache-first CDN proxy and startup prewarm.

use std::path::Path;
use std::sync::Arc;

use axum::body::Bytes;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::cdn::{mime, CdnCache, CdnError, Upstream};
use crate::config::CdnConfig;
use crate::lifecycle::shutdown;

/// A proxied file ready to send.
#[derive(Debug, Clone)]
pub struct CdnAsset {
    pub content_type: String,
    pub body: Bytes,
    /// Served from disk without contacting the upstream.
    pub cached: bool,
}

#[derive(Debug)]
pub struct CdnProxy {
    cache: CdnCache,
    upstream: Upstream,
    prewarm: Vec<String>,
}

impl CdnProxy {
    /// Cache under `config.cache_dir`, or `{sites_root}/_static/cdn`.
    pub fn new(config: &CdnConfig, sites_root: &Path) -> Result<Self, CdnError> {
        let root = config
            .cache_dir
            .clone()
            .unwrap_or_else(|| sites_root.join("_static").join("cdn"));
        Ok(Self {
            cache: CdnCache::new(root),
            upstream: Upstream::new(config)?,
            prewarm: config.prewarm.clone(),
        })
    }

    pub fn cache(&self) -> &CdnCache {
        &self.cache
    }

    /// Serve `path` from the cache, downloading it on a miss.
    pub async fn get(&self, path: &str) -> Result<CdnAsset, CdnError> {
        let local = self.cache.local_path(path)?;
        let content_type = mime::content_type(path);

        if let Some(body) = self.cache.read(&local).await? {
            tracing::debug!(path, "CDN cache hit");
            return Ok(CdnAsset {
                content_type,
                body,
                cached: true,
            });
        }

        let body = self.upstream.fetch(path).await?;
        match self.cache.store(&local, &body).await {
            Ok(()) => tracing::info!(path, bytes = body.len(), "CDN file cached"),
            Err(e) => tracing::warn!(path, error = %e, "Failed to cache CDN file"),
        }
        Ok(CdnAsset {
            content_type,
            body,
            cached: false,
        })
    }

    /// Download `path` unless it is already cached.
    pub async fn warm(&self, path: &str) -> Result<(), CdnError> {
        let local = self.cache.local_path(path)?;
        if self.cache.contains(&local).await {
            return Ok(());
        }
        let body = self.upstream.fetch(path).await?;
        self.cache.store(&local, &body).await
    }

    /// Warm every configured path, one at a time; failures are logged.
    pub async fn prewarm(&self) {
        tracing::info!(files = self.prewarm.len(), "Prewarming CDN cache");
        for path in &self.prewarm {
            if let Err(e) = self.warm(path).await {
                tracing::warn!(path = %path, error = %e, "Failed to prewarm CDN file");
            }
        }
        tracing::info!("CDN cache prewarm complete");
    }
}

/// Run [`CdnProxy::prewarm`] in the background until done or shutdown.
pub fn spawn_prewarm(proxy: Arc<CdnProxy>, shutdown_rx: broadcast::Receiver<()>) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = proxy.prewarm() => {}
            _ = shutdown::wait(shutdown_rx) => {
                tracing::debug!("CDN prewarm cancelled by shutdown");
            }
        }
    })
}
