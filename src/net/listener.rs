//! TCP listener binding.
//!
//! # Responsibilities
//! - Parse the bind address forms accepted on the command line
//! - Bind the listener and report the effective local address

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tokio::net::TcpListener;

/// Host used when the address omits one.
pub const ALL_INTERFACES: &str = "0.0.0.0";

/// Port used when nothing else is configured.
pub const DEFAULT_PORT: u16 = 8080;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Address could not be parsed.
    #[error("invalid bind address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Failed to bind to address.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// A parsed `HOST:PORT` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindAddress {
    host: String,
    port: u16,
}

impl BindAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for BindAddress {
    fn default() -> Self {
        Self::new(ALL_INTERFACES, DEFAULT_PORT)
    }
}

impl FromStr for BindAddress {
    type Err = ListenerError;

    /// Accepts `:PORT`, `HOST:PORT`, `[IPv6]:PORT` and a bare `PORT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ListenerError::InvalidAddress {
            address: s.to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (host, port) = match s.rsplit_once(':') {
            Some((host, port)) => (host, port),
            None => ("", s),
        };
        if port.is_empty() {
            return Err(invalid("missing port"));
        }
        let port: u16 = port.parse().map_err(|_| invalid("port is not a number in 0..=65535"))?;

        let host = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);
        if host.contains(':') && !s.starts_with('[') {
            return Err(invalid("IPv6 hosts must be bracketed"));
        }

        let host = if host.is_empty() { ALL_INTERFACES } else { host };
        Ok(Self::new(host, port))
    }
}

impl fmt::Display for BindAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Bind a TCP listener on `address`.
pub async fn bind(address: &BindAddress) -> Result<TcpListener, ListenerError> {
    let listener = TcpListener::bind((address.host(), address.port()))
        .await
        .map_err(|source| ListenerError::Bind {
            address: address.to_string(),
            source,
        })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::info!(address = %local_addr, "Listener bound");
    }
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_only_forms() {
        assert_eq!(":8080".parse::<BindAddress>().unwrap(), BindAddress::new("0.0.0.0", 8080));
        assert_eq!("9000".parse::<BindAddress>().unwrap(), BindAddress::new("0.0.0.0", 9000));
    }

    #[test]
    fn test_host_and_port() {
        let addr: BindAddress = "127.0.0.1:8081".parse().unwrap();
        assert_eq!(addr.host(), "127.0.0.1");
        assert_eq!(addr.port(), 8081);

        let addr: BindAddress = "localhost:3000".parse().unwrap();
        assert_eq!(addr.host(), "localhost");
    }

    #[test]
    fn test_ipv6() {
        let addr: BindAddress = "[::1]:8080".parse().unwrap();
        assert_eq!(addr.host(), "::1");
        assert_eq!(addr.to_string(), "[::1]:8080");
        assert!("::1:8080".parse::<BindAddress>().is_err());
    }

    #[test]
    fn test_invalid() {
        assert!("".parse::<BindAddress>().is_err());
        assert!(":".parse::<BindAddress>().is_err());
        assert!("host:".parse::<BindAddress>().is_err());
        assert!(":http".parse::<BindAddress>().is_err());
        assert!(":70000".parse::<BindAddress>().is_err());
    }

    #[test]
    fn test_default() {
        assert_eq!(BindAddress::default().to_string(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = bind(&BindAddress::new("127.0.0.1", 0)).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }
}
