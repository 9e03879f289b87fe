//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! --addr / listener.bind_address
//!     → listener.rs (parse `:PORT`, `HOST:PORT`, `PORT`; bind)
//!     → Hand off TcpListener to the HTTP layer
//! ```
//!
//! # Design Decisions
//! - `:PORT` binds every interface
//! - Host names are resolved at bind time, not at parse time

pub mod listener;

pub use listener::{bind, BindAddress, ListenerError};
