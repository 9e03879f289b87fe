//! Caching proxy for front-end libraries.
//!
//! Site templates reference shared libraries as `/cdn/{path}`; the host
//! fetches them once from the public CDN and serves every later request from
//! disk, so sites keep working offline once the cache is warm.
//!
//! # Data Flow
//! ```text
//! /cdn/{path}
//!     → cache.rs (validate path, look up {cache root}/{path})
//!     → hit: serve from disk
//!     → miss: upstream.rs (jsDelivr, or the Tailwind CDN for tailwindcss/)
//!     → cache.rs (store) → serve
//! ```
//!
//! # Design Decisions
//! - The content type follows the file extension (mime.rs), not the upstream
//! - Cached files never expire; responses carry a one-year `Cache-Control`
//! - A failed cache write is logged and the fetched body is still served

pub mod cache;
pub mod mime;
pub mod proxy;
pub mod upstream;

use std::path::PathBuf;

use thiserror::Error;

pub use cache::CdnCache;
pub use proxy::{spawn_prewarm, CdnAsset, CdnProxy};
pub use upstream::Upstream;

/// `Cache-Control` sent with every proxied asset.
pub const CACHE_CONTROL: &str = "public, max-age=31536000";

/// Why a CDN asset could not be served.
#[derive(Debug, Error)]
pub enum CdnError {
    /// Nothing after `/cdn/`.
    #[error("empty CDN path")]
    EmptyPath,

    /// Path has empty, `.` or `..` segments, or characters unsafe on disk.
    #[error("invalid CDN path: {0}")]
    InvalidPath(String),

    /// The upstream could not be reached or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with something other than 200.
    #[error("{url} returned status {status}")]
    UpstreamStatus { url: String, status: u16 },

    /// Reading or writing the cache failed.
    #[error("cache file {}: {source}", path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be built.
    #[error("HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
