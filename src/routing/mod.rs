//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path)
//!     → router.rs (percent-decode path, host → mapped site via DomainResolver)
//!     → matcher.rs (evaluate matchers in order)
//!     → Return: Target (Home, Page, ConfigApi, Static, Cdn, NotFound)
//! ```
//!
//! # Design Decisions
//! - Matchers built at startup, immutable at runtime
//! - No regex in hot path (prefix and suffix matching only)
//! - Deterministic: same input always yields the same target
//! - First match wins

pub mod matcher;
pub mod router;

pub use matcher::{Matcher, RouteRequest, Target};
pub use router::SiteRouter;
