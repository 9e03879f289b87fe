//! On-disk cache of proxied CDN files.
//!
//! # Design Decisions
//! - One file per CDN path, mirroring the URL layout under the cache root
//! - Paths are validated segment by segment, so nothing resolves outside
//!   the root
//! - Writes land in a uniquely named sibling first and are renamed into
//!   place; readers never see a partial file

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::body::Bytes;

use crate::cdn::CdnError;

#[derive(Debug, Clone)]
pub struct CdnCache {
    root: PathBuf,
}

impl CdnCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `path` (the part after `/cdn/`, already decoded).
    pub fn local_path(&self, path: &str) -> Result<PathBuf, CdnError> {
        if path.is_empty() {
            return Err(CdnError::EmptyPath);
        }

        let mut local = self.root.clone();
        for segment in path.split('/') {
            if !is_safe_segment(segment) {
                return Err(CdnError::InvalidPath(path.to_string()));
            }
            local.push(segment);
        }
        Ok(local)
    }

    /// Cached bytes, or `None` on a miss.
    pub async fn read(&self, local: &Path) -> Result<Option<Bytes>, CdnError> {
        match tokio::fs::read(local).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CdnError::Cache {
                path: local.to_path_buf(),
                source,
            }),
        }
    }

    pub async fn contains(&self, local: &Path) -> bool {
        tokio::fs::try_exists(local).await.unwrap_or(false)
    }

    /// Atomically place `data` at `local`, creating parent directories.
    pub async fn store(&self, local: &Path, data: &[u8]) -> Result<(), CdnError> {
        let cache_err = |source: std::io::Error| CdnError::Cache {
            path: local.to_path_buf(),
            source,
        };

        let (Some(parent), Some(name)) = (local.parent(), local.file_name()) else {
            return Err(CdnError::InvalidPath(local.display().to_string()));
        };
        tokio::fs::create_dir_all(parent).await.map_err(cache_err)?;

        let partial = parent.join(format!(
            ".{}.{}.part",
            name.to_string_lossy(),
            uuid::Uuid::new_v4().simple()
        ));
        tokio::fs::write(&partial, data).await.map_err(cache_err)?;
        if let Err(e) = tokio::fs::rename(&partial, local).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(cache_err(e));
        }
        Ok(())
    }
}

fn is_safe_segment(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
        && !segment
            .chars()
            .any(|c| matches!(c, '\\' | ':' | '\0') || c.is_control())
}
