//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (concurrency limit, request body size)
//!     → Pass to routing
//!
//! Outgoing response:
//!     → headers.rs (hardening headers, only when absent)
//! ```
//!
//! # Design Decisions
//! - Sites are read-only content: no authentication, no rate limiting
//! - Every layer is optional through `SecurityConfig`, except the
//!   concurrency limit which provides backpressure

pub mod headers;
pub mod limits;
