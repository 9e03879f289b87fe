//! Request-time resolution errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::render::RenderError;

/// Why a site, page, config or asset could not be served.
///
/// Everything except [`SiteError::HomeTemplateDirMissing`] and
/// [`SiteError::Render`] is a plain not-found.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Site id is not in the registry.
    #[error("site {0} not found")]
    UnknownSite(String),

    /// Site exists but is not enabled.
    #[error("site {0} is not enabled")]
    SiteDisabled(String),

    /// Per-site config file is missing or unparsable.
    #[error("config for site {0} not found")]
    ConfigNotFound(String),

    /// Template file (or the site's template directory) does not exist.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Site has no static directory.
    #[error("static directory for site {0} not found")]
    StaticRootNotFound(String),

    /// Requested asset is missing from the static directory.
    #[error("asset not found: {0}")]
    AssetNotFound(String),

    /// The home site's template directory is missing.
    #[error("home template directory does not exist: {}", .0.display())]
    HomeTemplateDirMissing(PathBuf),

    /// The template engine failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl SiteError {
    /// True for every variant answered with 404.
    pub fn is_not_found(&self) -> bool {
        !matches!(
            self,
            SiteError::HomeTemplateDirMissing(_) | SiteError::Render(_)
        )
    }
}
