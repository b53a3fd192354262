//! Code for the configuration of the integration.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Display name used when a printer entry does not set one.
pub const DEFAULT_NAME: &str = "Zortrax Plus Printer";

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_port() -> u16 {
    zortrax::client::DEFAULT_PORT
}

fn default_quality() -> u8 {
    80
}

/// The configuration of the integration.
#[derive(Default, Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// The printers to expose, one camera/sensor/switch trio each.
    #[serde(default)]
    pub printers: Vec<PrinterConfig>,
}

impl Config {
    /// Parse a configuration from a toml file.
    pub fn from_file(file: &Path) -> Result<Self> {
        let config = std::fs::read_to_string(file)?;
        Self::from_str(&config)
    }

    /// Parse a configuration from a toml string.
    pub fn from_str(config: &str) -> Result<Self> {
        Ok(toml::from_str(config)?)
    }

    /// Get the printer config with the given name.
    pub fn get_printer(&self, name: &str) -> Option<&PrinterConfig> {
        self.printers.iter().find(|p| p.name == name)
    }
}

/// The configuration for a single printer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrinterConfig {
    /// Display name for the printer's entities.
    #[serde(default = "default_name")]
    pub name: String,

    /// Hostname or IP address of the printer.
    pub host: String,

    /// TCP port of the printer's control service.
    #[serde(default = "default_port")]
    pub port: u16,

    /// JPEG quality requested from the onboard camera, 0-100.
    #[serde(default = "default_quality")]
    pub quality: u8,
}

impl PrinterConfig {
    /// Build a protocol client for this printer.
    pub fn client(&self) -> zortrax::client::Client {
        zortrax::client::Client::new(self.host.clone(), self.port)
    }
}
