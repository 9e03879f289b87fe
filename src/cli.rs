//! Command-line interface.
//!
//! Flags override the corresponding host config fields; anything not
//! given on the command line keeps the file (or default) value.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{HostConfig, LogFormat};

#[derive(Debug, Parser)]
#[command(name = "jinja-hub")]
#[command(about = "Multi-tenant host for Jinja-templated front-end sites", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Bind address: `:PORT`, `HOST:PORT` or `PORT`.
    #[arg(long)]
    pub addr: Option<String>,

    /// Directory holding `sites.json` and one directory per site.
    #[arg(long, value_name = "DIR")]
    pub sites_dir: Option<PathBuf>,

    /// Host config file (TOML).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log output format.
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Apply command-line overrides to `config`.
    pub fn apply(&self, config: &mut HostConfig) {
        if let Some(addr) = &self.addr {
            config.listener.bind_address = addr.clone();
        }
        if let Some(dir) = &self.sites_dir {
            config.sites.root = dir.clone();
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["jinja-hub"]).unwrap();
        let mut config = HostConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "jinja-hub",
            "--addr",
            ":9000",
            "--sites-dir",
            "/srv/sites",
            "--log-format",
            "json",
        ])
        .unwrap();
        let mut config = HostConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.listener.bind_address, ":9000");
        assert_eq!(config.sites.root, PathBuf::from("/srv/sites"));
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        assert!(Cli::try_parse_from(["jinja-hub", "--log-format", "xml"]).is_err());
    }
}
