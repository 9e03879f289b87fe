//! Upstream CDN client.

use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Client, StatusCode};

use crate::cdn::CdnError;
use crate::config::CdnConfig;

/// Paths under this prefix are served by the Tailwind CDN; the rest by jsDelivr.
pub const TAILWIND_PREFIX: &str = "tailwindcss/";

#[derive(Debug, Clone)]
pub struct Upstream {
    client: Client,
    jsdelivr_url: String,
    tailwind_url: String,
}

impl Upstream {
    pub fn new(config: &CdnConfig) -> Result<Self, CdnError> {
        // Redirects are followed by the client (up to its default limit).
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(concat!("jinja-hub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CdnError::Client)?;

        Ok(Self {
            client,
            jsdelivr_url: config.jsdelivr_url.trim_end_matches('/').to_string(),
            tailwind_url: config.tailwind_url.clone(),
        })
    }

    /// Source URL for a CDN path. Every `tailwindcss/` path maps to the
    /// Tailwind play CDN script itself.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with(TAILWIND_PREFIX) {
            self.tailwind_url.clone()
        } else {
            format!("{}/{}", self.jsdelivr_url, path)
        }
    }

    /// Download `path`; only a final 200 counts as success.
    pub async fn fetch(&self, path: &str) -> Result<Bytes, CdnError> {
        let url = self.url_for(path);
        tracing::info!(url = %url, "Downloading CDN file");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(CdnError::Fetch { url, source }),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CdnError::UpstreamStatus {
                url,
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|source| CdnError::Fetch { url, source })
    }
}
