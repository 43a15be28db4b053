//! TOML configuration: default query scope, data source, chart output.
//!
//! ```toml
//! [query]
//! season = "2024-25"
//! season_type = "Regular Season"
//!
//! [provider]
//! kind = "nba"
//! base_url = "https://stats.nba.com/stats"
//! timeout_secs = 30
//! max_retries = 3
//! data_dir = "data"
//!
//! [charts]
//! output_dir = "charts"
//! ```
//!
//! Every section and key is optional. Unknown keys are rejected so typos
//! surface instead of silently falling back to defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use hoopstat_core::data::{CircuitBreaker, CsvProvider, NbaStatsConfig, NbaStatsProvider, ProviderError, StatsProvider};
use hoopstat_core::domain::{Season, SeasonType};

/// Errors from loading configuration or building what it describes.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
    #[error("provider setup failed: {0}")]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoopstatConfig {
    pub query: QuerySection,
    pub provider: ProviderSection,
    pub charts: ChartsSection,
}

/// Defaults applied when a command doesn't name them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuerySection {
    pub season: Season,
    pub season_type: SeasonType,
}

impl Default for QuerySection {
    fn default() -> Self {
        Self {
            season: Season::new(2024),
            season_type: SeasonType::RegularSeason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// The public stats API.
    #[default]
    Nba,
    /// Snapshot files under `data_dir`.
    Csv,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSection {
    pub kind: ProviderKind,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub data_dir: PathBuf,
}

impl Default for ProviderSection {
    fn default() -> Self {
        let nba = NbaStatsConfig::default();
        Self {
            kind: ProviderKind::default(),
            base_url: nba.base_url,
            timeout_secs: nba.timeout.as_secs(),
            max_retries: nba.max_retries,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl ProviderSection {
    /// Transport settings for the remote provider.
    pub fn nba_config(&self) -> Result<NbaStatsConfig, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "provider.timeout_secs",
                message: "must be at least 1".into(),
            });
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                field: "provider.base_url",
                message: format!("'{}' is not an http(s) URL", self.base_url),
            });
        }
        Ok(NbaStatsConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            ..NbaStatsConfig::default()
        })
    }

    /// Build the configured provider.
    pub fn build(&self) -> Result<Box<dyn StatsProvider>, ConfigError> {
        match self.kind {
            ProviderKind::Nba => {
                let breaker = Arc::new(CircuitBreaker::default_provider());
                let provider = NbaStatsProvider::new(self.nba_config()?, breaker)?;
                Ok(Box::new(provider))
            }
            ProviderKind::Csv => Ok(Box::new(CsvProvider::new(self.data_dir.clone()))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartsSection {
    pub output_dir: PathBuf,
}

impl Default for ChartsSection {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts"),
        }
    }
}

impl HoopstatConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load `path`, or the default location when `None`. A missing default
    /// file means defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p),
                other => {
                    debug!(path = ?other, "no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// `<config dir>/hoopstat/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hoopstat").join("config.toml"))
}
