//! Serializable MarketPulse configuration (TOML).
//!
//! Every field has a default, so an empty file is a valid config. Indicator
//! windows are fixed by the pipeline and have no config keys.

use crate::catalog::{AssetCatalog, CatalogError};
use crate::data::yahoo::DEFAULT_USER_AGENT;
use crate::data::{DataSource, Lookback, YahooConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarketPulseConfig {
    pub data: DataConfig,
    pub catalog: CatalogConfig,
}

/// Upstream data settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub source: DataSource,
    pub lookback: Lookback,
    /// Directory of `<SYMBOL>.csv` files for the CSV source.
    pub csv_dir: PathBuf,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub user_agent: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Yahoo,
            lookback: Lookback::OneYear,
            csv_dir: PathBuf::from("data"),
            timeout_secs: 30,
            max_retries: 3,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl DataConfig {
    /// HTTP settings for the Yahoo provider.
    pub fn yahoo(&self) -> YahooConfig {
        YahooConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            user_agent: self.user_agent.clone(),
            ..YahooConfig::default()
        }
    }
}

/// Asset catalog source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// TOML catalog file. The built-in catalog is used when absent.
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    /// Load the configured catalog, or copy the built-in one.
    pub fn load(&self) -> Result<AssetCatalog, CatalogError> {
        match &self.path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading asset catalog");
                AssetCatalog::from_file(path)
            }
            None => Ok(AssetCatalog::builtin().clone()),
        }
    }
}

impl MarketPulseConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.data.timeout_secs == 0 {
            return Err(ConfigError::Invalid("data.timeout_secs must be > 0".into()));
        }
        if self.data.max_retries > 10 {
            return Err(ConfigError::Invalid("data.max_retries must be <= 10".into()));
        }
        Ok(())
    }
}
