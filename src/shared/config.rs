use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::Deserialize;

use super::env_var::EnvVars;

/// Top-level configuration for review-corpus.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// OpenReview API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Venue whose submissions are scraped.
    #[serde(default)]
    pub venue: VenueConfig,

    /// Output location.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// OpenReview API configuration.
#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// API base URL (default: "https://api2.openreview.net").
    #[serde(default = "default_base_url")]
    #[schemars(default = "default_base_url")]
    pub base_url: String,

    /// Notes requested per page (default: 1000).
    #[serde(default = "default_page_size")]
    #[schemars(default = "default_page_size")]
    pub page_size: usize,

    /// HTTP request timeout in seconds (default: 60).
    #[serde(default = "default_timeout_secs")]
    #[schemars(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bearer token. Anonymous access is used when unset.
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

/// Venue configuration.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VenueConfig {
    /// Submission invitation (default: "ICLR.cc/2025/Conference/-/Submission").
    #[serde(default = "default_invitation")]
    #[schemars(default = "default_invitation")]
    pub invitation: String,

    /// Short venue name used in output file names (default: "iclr_2025").
    #[serde(default = "default_venue_name")]
    #[schemars(default = "default_venue_name")]
    pub name: String,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            invitation: default_invitation(),
            name: default_venue_name(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory holding the raw cache, aggregate and per-submission files (default: "data").
    #[serde(default = "default_data_dir")]
    #[schemars(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Rewrite the aggregate file after this many new submissions (default: 100).
    /// Entries not yet flushed are recovered from the record files on the next run.
    #[serde(default = "default_flush_interval")]
    #[schemars(default = "default_flush_interval")]
    pub flush_interval: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            flush_interval: default_flush_interval(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Also write JSON logs to this file.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://api2.openreview.net".to_string()
}

fn default_page_size() -> usize {
    1000
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_invitation() -> String {
    "ICLR.cc/2025/Conference/-/Submission".to_string()
}

fn default_venue_name() -> String {
    "iclr_2025".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_flush_interval() -> usize {
    100
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Load configuration from ~/.config/review-corpus/config.ya?ml and apply
/// environment overrides. Falls back to Config::default() if no config file exists.
pub fn load_config() -> anyhow::Result<Config> {
    let env = EnvVars::load();
    let mut config = match env.config_dir() {
        Some(dir) => load_config_from_dir(&dir.join("review-corpus"))?,
        None => Config::default(),
    };
    env.apply(&mut config);
    Ok(config)
}

/// Load configuration from a specific directory.
/// Searches for config.yaml, then config.yml in the given directory.
/// Returns Config::default() if neither file exists.
pub fn load_config_from_dir(dir: &Path) -> anyhow::Result<Config> {
    for filename in &["config.yaml", "config.yml"] {
        let path = dir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(content) => return parse_config(&content, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::ReadError { path, source: e }.into()),
        }
    }

    Ok(Config::default())
}

fn parse_config(content: &str, path: &Path) -> anyhow::Result<Config> {
    serde_yaml::from_str(content)
        .map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
        .map_err(Into::into)
}

/// Generate JSON Schema for the Config struct.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}
