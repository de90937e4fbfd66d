/// Configuration loaded from `config.toml`.
///
/// Every field is optional; a missing file means defaults.
use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::color::{default_palette, is_valid_hex};
use crate::types::Millis;

/// Version token lives in the key: a schema change means a new key and a fresh history.
pub const DEFAULT_STORAGE_KEY: &str = "timetally.history.v1";
pub const DEFAULT_TICK_INTERVAL_MS: Millis = 1_000;
pub const DEFAULT_CHART_REFRESH_MS: Millis = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Categories offered by the picker, in display order.
    pub categories: Vec<String>,
    /// Chart colors as `#RRGGBB`, assigned by category position.
    pub palette: Vec<String>,
    pub storage_key: String,
    pub tick_interval_ms: Millis,
    pub chart_refresh_ms: Millis,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: ["Work", "Study", "Exercise", "Reading", "Leisure"]
                .into_iter()
                .map(String::from)
                .collect(),
            palette: default_palette(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            chart_refresh_ms: DEFAULT_CHART_REFRESH_MS,
        }
    }
}

impl Config {
    /// Loads from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => {
                    info!("No config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.categories.iter().any(|category| category.trim().is_empty()) {
            bail!("Category names must not be empty");
        }
        if self.palette.is_empty() {
            bail!("Palette must contain at least one color");
        }
        if let Some(color) = self.palette.iter().find(|color| !is_valid_hex(color)) {
            bail!("Invalid palette color '{color}', expected #RRGGBB");
        }
        if self.storage_key.trim().is_empty() {
            bail!("Storage key must not be empty");
        }
        if self.tick_interval_ms <= 0 {
            bail!("tick_interval_ms must be greater than zero");
        }
        if self.chart_refresh_ms < 0 {
            bail!("chart_refresh_ms must not be negative");
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("timetally").join("config.toml"))
}
