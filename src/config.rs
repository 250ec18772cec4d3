//! Runtime configuration read from the environment.
//!
//! A `.env` file is loaded first (see `main.rs`), then these variables:
//! - `CIDRMATE_DEFAULT_CIDR` - CIDR shown when none is given
//! - `CIDRMATE_FORMAT` - `text`, `csv` or `json`
//! - `CIDRMATE_LOG_CONFIG` - path to the log4rs YAML file

use crate::models::Ipv4Block;
use crate::output::OutputFormat;
use crate::processing::initial_cidr;
use std::error::Error;

pub const ENV_DEFAULT_CIDR: &str = "CIDRMATE_DEFAULT_CIDR";
pub const ENV_FORMAT: &str = "CIDRMATE_FORMAT";
pub const ENV_LOG_CONFIG: &str = "CIDRMATE_LOG_CONFIG";

/// Default log4rs configuration file.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Canonical CIDR, already validated.
    pub default_cidr: String,
    pub format: OutputFormat,
    pub log_config: String,
    /// `CIDRMATE_DEFAULT_CIDR` text that was set but did not parse.
    pub rejected_cidr: Option<String>,
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let requested_cidr = lookup(ENV_DEFAULT_CIDR);
        let default_cidr = initial_cidr(requested_cidr.as_deref());
        let rejected_cidr = requested_cidr.filter(|cidr| !Ipv4Block::parse(cidr).is_valid());
        let format = match lookup(ENV_FORMAT) {
            Some(format) => format
                .parse::<OutputFormat>()
                .map_err(|e| format!("Invalid {ENV_FORMAT}: {e}"))?,
            None => OutputFormat::default(),
        };
        let log_config = lookup(ENV_LOG_CONFIG).unwrap_or_else(|| DEFAULT_LOG_CONFIG.to_string());

        Ok(Config {
            default_cidr,
            format,
            log_config,
            rejected_cidr,
        })
    }

    /// Log problems found while reading the configuration.
    ///
    /// Configuration is read before the logger exists, so call this once
    /// logging is initialised.
    pub fn log_warnings(&self) {
        if let Some(cidr) = &self.rejected_cidr {
            log::warn!(
                "Ignoring invalid {ENV_DEFAULT_CIDR}={cidr:?}, using {}",
                self.default_cidr
            );
        }
    }
}
