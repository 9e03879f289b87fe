//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load registry → Build resolvers and router → Log enabled sites
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Server stops accepting → In-flight requests drain → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: host config, logging, sites, then listeners
//! - Any startup error is fatal; nothing is served from a partial registry

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{bootstrap, SiteHost, StartupError};
