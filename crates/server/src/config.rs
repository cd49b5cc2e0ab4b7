//! Server configuration.
//!
//! Settings come from command-line flags (or their environment variables),
//! then an optional TOML file, then built-in defaults.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [logging]
//! filter = "issue_tracker=debug,tower_http=info"
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Command-line interface of the server binary.
#[derive(Debug, Default, Parser)]
#[command(name = "issue-tracker-server", version, about = "Issue tracker REST API server")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "ISSUE_TRACKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "ISSUE_TRACKER_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Tracing filter directive (e.g. "debug" or "issue_tracker=debug")
    #[arg(long, env = "ISSUE_TRACKER_LOG")]
    pub log_filter: Option<String>,
}

/// Contents of the configuration file. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server: ServerSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub filter: Option<String>,
}

impl FileConfig {
    /// Load and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Effective server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `None` defers to `RUST_LOG`, then "info"
    pub log_filter: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_filter: None,
        }
    }
}

impl ServerConfig {
    /// Resolve settings from the CLI, reading the config file it names.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    /// Combine CLI values over file values over defaults.
    pub fn merge(cli: Cli, file: FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            host: cli.host.or(file.server.host).unwrap_or(defaults.host),
            port: cli.port.or(file.server.port).unwrap_or(defaults.port),
            log_filter: cli.log_filter.or(file.logging.filter),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
