//! Jinja Hub: a multi-tenant host for template-rendered front-end sites.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                      SITE HOST                        │
//!                     │                                                       │
//!   Client Request    │  ┌─────────┐    ┌─────────┐    ┌──────────────┐      │
//!   ──────────────────┼─▶│   net   │───▶│  http   │───▶│   routing    │      │
//!                     │  │listener │    │ server  │    │ (host, path) │      │
//!                     │  └─────────┘    └─────────┘    └──────┬───────┘      │
//!                     │                                       │ Target       │
//!                     │                                       ▼              │
//!   Client Response   │  ┌─────────┐    ┌─────────┐    ┌──────────────┐      │
//!   ◀─────────────────┼──│response │◀───│ render  │◀───│    sites     │◀─────┼── sites/
//!                     │  │ mapping │    │ engine  │    │  resolvers   │      │   (registry,
//!                     │  └─────────┘    └─────────┘    └──────────────┘      │    configs,
//!                     │                                                       │    templates)
//!                     │  ┌─────────────────────────────────────────────────┐ │
//!                     │  │             Cross-Cutting Concerns               │ │
//!                     │  │  config · observability · security · lifecycle   │ │
//!                     │  └─────────────────────────────────────────────────┘ │
//!                     └──────────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod cdn;
pub mod cli;
pub mod config;
pub mod http;
pub mod net;
pub mod render;
pub mod routing;
pub mod sites;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::HostConfig;
pub use http::HttpServer;
pub use lifecycle::{bootstrap, Shutdown, SiteHost};
