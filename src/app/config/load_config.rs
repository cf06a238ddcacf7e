//! Configuration loading from `config/config.yaml`.

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::{Config, ConfigError};
use crate::services::ErrorLog;

/// Load and parse the YAML configuration at `path`.
///
/// The document is decoded but not checked for required keys; callers look up
/// `api_keys` entries themselves.
pub fn load_config(path: &Path, log: &ErrorLog) -> Result<Config, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => return Err(classify_io_error(path, err, log)),
    };

    parse_config_content(&content).inspect_err(|err| {
        log.error(&format!("YAML parsing error while loading configuration: {err}"));
    })
}

/// Parse configuration from string content. An empty document yields defaults.
pub fn parse_config_content(content: &str) -> Result<Config, ConfigError> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}

fn classify_io_error(path: &Path, err: io::Error, log: &ErrorLog) -> ConfigError {
    match err.kind() {
        io::ErrorKind::NotFound => {
            log.error(&format!("Configuration file not found: {}.", path.display()));
            ConfigError::NotFound { path: path.to_path_buf() }
        }
        io::ErrorKind::PermissionDenied => {
            log.error(&format!("Permission denied for config file: {}.", path.display()));
            ConfigError::PermissionDenied
        }
        io::ErrorKind::InvalidData => {
            log.error(&format!("Configuration file is not valid UTF-8: {}.", path.display()));
            ConfigError::Parse(err.to_string())
        }
        _ => {
            log.error(&format!("Disk space issue while loading configuration: {err}."));
            ConfigError::Storage(err)
        }
    }
}
