//! CLI configuration file

use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use serde::Deserialize;

/// Settings read from the TOML config file. Credentials never live here;
/// they come from the process environment.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Base URL of the GLPI REST endpoint
    pub glpi_url: String,
    /// Asset type to query (defaults to "Computer")
    pub asset_type: Option<String>,
    /// Upper bound on records fetched in one run
    pub limit: Option<u64>,
}

impl Config {
    /// Load and validate a config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// omits `glpi_url`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&raw)
    }

    fn parse(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw).wrap_err("invalid config file")?;
        if config.glpi_url.trim().is_empty() {
            return Err(eyre!("glpi_url is required"));
        }
        Ok(config)
    }
}
