//! # Configuration
//!
//! Server settings are resolved in three layers, later ones winning:
//!
//! 1. built-in defaults ([`AppConfig::default`]);
//! 2. a YAML file, from `FINANCE_TRACKER_CONFIG` or `<data dir>/config.yaml`
//!    when that file exists;
//! 3. environment overrides (`FINANCE_TRACKER_BIND`, `FINANCE_TRACKER_DATA_DIR`,
//!    `GEMINI_API_KEY`, `PORT`).
//!
//! ## YAML Format
//!
//! ```yaml
//! bind_address: "127.0.0.1:8080"
//! storage: csv
//! log_level: info
//! default_country: Germany
//! gemini:
//!   model: gemini-2.5-flash
//!   timeout_secs: 60
//! ```

use serde::{Deserialize, Serialize};
use shared::CountryInfo;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::domain::CountryTable;
use crate::storage::CsvConnection;

const CONFIG_ENV: &str = "FINANCE_TRACKER_CONFIG";
const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("No data directory configured and no home directory found")]
    NoDataDirectory,
    #[error("Default country '{0}' is not in the country table")]
    UnknownDefaultCountry(String),
}

/// Which gateway backs the entity store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    Csv,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    /// Socket timeout for generation requests; none by default
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: String,
    /// Defaults to `~/Documents/Finance Tracker`
    pub data_directory: Option<PathBuf>,
    pub storage: StorageMode,
    pub log_level: String,
    /// Built web frontend to serve for non-API paths
    pub static_dir: Option<PathBuf>,
    pub allowed_origin: String,
    pub default_country: String,
    /// Replaces the built-in country table when set
    pub countries: Option<Vec<CountryInfo>>,
    pub gemini: GeminiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            data_directory: None,
            storage: StorageMode::Csv,
            log_level: "info".to_string(),
            static_dir: None,
            allowed_origin: "http://localhost:3000".to_string(),
            default_country: "Germany".to_string(),
            countries: None,
            gemini: GeminiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration with `env` standing in for environment lookups
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match Self::config_file(&env) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(&env)?;
        config.country_table()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn config_file(env: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
        if let Some(path) = env(CONFIG_ENV).filter(|p| !p.trim().is_empty()) {
            return Some(PathBuf::from(path));
        }
        let data_dir = match env("FINANCE_TRACKER_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => CsvConnection::default_directory().ok()?,
        };
        let candidate = data_dir.join(CONFIG_FILE_NAME);
        candidate.is_file().then_some(candidate)
    }

    pub fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(bind) = non_empty(env("FINANCE_TRACKER_BIND")) {
            self.bind_address = bind;
        }

        if let Some(port) = non_empty(env("PORT")) {
            let port: u16 = port.parse().map_err(|_| ConfigError::InvalidEnv {
                name: "PORT",
                value: port.clone(),
            })?;
            let host = self
                .bind_address
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| self.bind_address.clone());
            self.bind_address = format!("{}:{}", host, port);
        }

        if let Some(dir) = non_empty(env("FINANCE_TRACKER_DATA_DIR")) {
            self.data_directory = Some(PathBuf::from(dir));
        }

        match non_empty(env("GEMINI_API_KEY")) {
            Some(key) => self.gemini.api_key = Some(key),
            None if self.gemini.api_key.is_none() => {
                warn!("No GEMINI_API_KEY set; survival guide generation will fail");
            }
            None => {}
        }

        Ok(())
    }

    pub fn data_directory(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_directory {
            Some(dir) => Ok(dir.clone()),
            None => CsvConnection::default_directory().map_err(|_| ConfigError::NoDataDirectory),
        }
    }

    /// Country table in effect, validated against the default country
    pub fn country_table(&self) -> Result<CountryTable, ConfigError> {
        let table = match &self.countries {
            Some(countries) => CountryTable::new(countries.clone()),
            None => CountryTable::default(),
        };
        if !table.contains(&self.default_country) {
            return Err(ConfigError::UnknownDefaultCountry(self.default_country.clone()));
        }
        Ok(table)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
