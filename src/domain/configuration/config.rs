//! Configuration domain models.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::ThreatSource;

/// Default location of the configuration document.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// Page size requested from paged listing endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Configuration loaded from `config/config.yaml`.
///
/// Only `api_keys` is expected; every section defaults when absent and unknown
/// top-level keys are kept in `extra`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// API key per source, keyed by [`ThreatSource::config_key`]. Values are kept
    /// as written; scalars are read back as strings by [`Config::api_key`].
    #[serde(default)]
    pub api_keys: BTreeMap<String, serde_yaml::Value>,
    /// Error log settings.
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Per-source overrides.
    #[serde(default)]
    pub sources: BTreeMap<String, SourceSettings>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Config {
    /// API key configured for `source`, if present as a string, number or boolean.
    pub fn api_key(&self, source: ThreatSource) -> Option<String> {
        match self.api_keys.get(source.config_key())? {
            serde_yaml::Value::String(key) => Some(key.clone()),
            serde_yaml::Value::Number(key) => Some(key.to_string()),
            serde_yaml::Value::Bool(key) => Some(key.to_string()),
            _ => None,
        }
    }

    pub fn set_api_key(&mut self, source: ThreatSource, key: impl Into<String>) {
        self.api_keys
            .insert(source.config_key().to_string(), serde_yaml::Value::String(key.into()));
    }

    /// Base address for `source`, honoring `sources.<name>.base_url`.
    pub fn base_url(&self, source: ThreatSource) -> &str {
        self.source_settings(source)
            .and_then(|s| s.base_url.as_deref())
            .unwrap_or_else(|| source.default_base_url())
    }

    /// Listing page size for `source`.
    pub fn page_size(&self, source: ThreatSource) -> u32 {
        self.source_settings(source).and_then(|s| s.page_size).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn source_settings(&self, source: ThreatSource) -> Option<&SourceSettings> {
        self.sources.get(source.config_key())
    }
}

/// Rotating error log settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Log file path.
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
    /// Rotate once the file would reach this many bytes. Zero disables rotation.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    /// Rotated files to keep.
    #[serde(default = "default_backup_count")]
    pub backup_count: usize,
    /// Minimum level written: `error`, `warning` or `info`.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            path: default_log_path(),
            max_bytes: default_max_bytes(),
            backup_count: default_backup_count(),
            level: default_level(),
        }
    }
}

fn default_log_path() -> PathBuf {
    PathBuf::from("data/error.log")
}

fn default_max_bytes() -> u64 {
    1_000_000
}

fn default_backup_count() -> usize {
    5
}

fn default_level() -> String {
    "error".to_string()
}

/// Overrides for one source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
}
