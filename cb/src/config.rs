//! contactbook configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main contactbook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Attempts allowed per field during interactive entry
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Optional upper bound on the number of stored contacts
    #[serde(rename = "max-contacts")]
    pub max_contacts: Option<usize>,

    /// File used when a file prompt is left empty
    #[serde(rename = "default-file")]
    pub default_file: PathBuf,

    /// File used when the report prompt is left empty
    #[serde(rename = "report-file")]
    pub report_file: PathBuf,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Colored console output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_attempts: crate::DEFAULT_MAX_ATTEMPTS,
            max_contacts: None,
            default_file: PathBuf::from(crate::DEFAULT_CONTACTS_FILE),
            report_file: PathBuf::from(crate::DEFAULT_REPORT_FILE),
            log_level: None,
            color: true,
        }
    }
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(eyre::eyre!("max-attempts must be at least 1"));
        }
        if self.max_contacts == Some(0) {
            return Err(eyre::eyre!("max-contacts must be at least 1 when set"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    ///
    /// An explicit path must load. Otherwise the first readable candidate
    /// from [`Config::candidate_paths`] wins, then defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        match Self::first_loadable(&Self::candidate_paths()) {
            Some(config) => Ok(config),
            None => {
                tracing::info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read just the log level, before logging is set up
    ///
    /// Errors are swallowed here; the full load reports them later.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let config = match config_path {
            Some(path) => Self::load_from_file(path).ok(),
            None => Self::first_loadable(&Self::candidate_paths()),
        };
        config.and_then(|config| config.log_level)
    }

    /// `./.contactbook.yml`, then `~/.config/contactbook/contactbook.yml`
    fn candidate_paths() -> Vec<PathBuf> {
        [Some(PathBuf::from(".contactbook.yml")), Self::user_config_path()]
            .into_iter()
            .flatten()
            .collect()
    }

    /// First candidate that exists and parses; broken files are skipped
    fn first_loadable(candidates: &[PathBuf]) -> Option<Self> {
        candidates.iter().filter(|path| path.exists()).find_map(|path| {
            Self::load_from_file(path)
                .map_err(|e| tracing::warn!("Failed to load config from {}: {}", path.display(), e))
                .ok()
        })
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("contactbook").join("contactbook.yml"))
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}
