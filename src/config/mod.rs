//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! host config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CLI overrides applied in main
//!     → HostConfig (validated, immutable)
//!     → shared with subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Site content (registry, per-site JSON) is not host config; see `crate::sites`

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    CdnConfig, HostConfig, ListenerConfig, LogFormat, ObservabilityConfig, SecurityConfig, SitesConfig,
    TimeoutConfig,
};
pub use validation::ValidationError;
