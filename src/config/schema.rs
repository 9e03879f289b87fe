//! Configuration schema definitions.
//!
//! This module defines the host process configuration. The sites registry
//! and per-site configs are JSON documents owned by `crate::sites`; this
//! file only covers how the process itself listens, logs and protects
//! itself. All types derive Serde traits for deserialization from TOML.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the site host.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    /// Listener configuration (bind address, connection limit).
    pub listener: ListenerConfig,

    /// Where the sites tree lives.
    pub sites: SitesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Response hardening.
    pub security: SecurityConfig,

    /// `/cdn/` caching proxy.
    pub cdn: CdnConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address: `:PORT`, `HOST:PORT` or `PORT`.
    pub bind_address: String,

    /// Maximum requests processed concurrently (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: ":8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Location of the sites tree.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SitesConfig {
    /// Directory containing the registry and one directory per site.
    pub root: PathBuf,

    /// Registry file name relative to `root`.
    pub registry_file: String,
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("sites"),
            registry_file: "sites.json".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time to produce a response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SecurityConfig {
    /// Add security response headers.
    pub enable_headers: bool,
    /// Gzip responses when the client accepts it.
    pub compression: bool,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            compression: true,
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Caching proxy for front-end libraries under `/cdn/`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CdnConfig {
    /// Serve `/cdn/`; when off those paths are 404.
    pub enabled: bool,

    /// Cache directory. Defaults to `_static/cdn` under the sites root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Base URL for every path outside `tailwindcss/`.
    pub jsdelivr_url: String,

    /// Script served for every `tailwindcss/` path.
    pub tailwind_url: String,

    /// Upstream request timeout in seconds.
    pub fetch_timeout_secs: u64,

    /// Paths downloaded in the background at startup.
    pub prewarm: Vec<String>,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_dir: None,
            jsdelivr_url: "https://cdn.jsdelivr.net".to_string(),
            tailwind_url: "https://cdn.tailwindcss.com".to_string(),
            fetch_timeout_secs: 30,
            prewarm: vec![
                "npm/daisyui@4.12.24/dist/full.min.css".to_string(),
                "npm/alpinejs@3.13.3/dist/cdn.min.js".to_string(),
                "npm/crypto-js@4.2.0/crypto-js.min.js".to_string(),
            ],
        }
    }
}
