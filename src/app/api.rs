//! API Facade for the application.
//!
//! These functions glue together config loading, log setup and command
//! execution for library callers and the CLI.

use std::path::Path;

use crate::app::commands::{assets, collect};
use crate::app::config::load_config;
use crate::domain::{AppError, Config, DEFAULT_CONFIG_PATH, LoggingSettings, Record};
use crate::services::{ErrorLog, FileAssetSource, HttpFeedClientFactory};

/// Load the config at `config_path` and open the error log it describes.
///
/// Failures while loading the config are written to the default log location.
pub fn bootstrap(config_path: &Path) -> Result<(Config, ErrorLog), AppError> {
    bootstrap_with(config_path, &LoggingSettings::default())
}

/// Like [`bootstrap`], reporting config failures to `fallback` instead.
pub fn bootstrap_with(
    config_path: &Path,
    fallback: &LoggingSettings,
) -> Result<(Config, ErrorLog), AppError> {
    let fallback_log = ErrorLog::open(fallback)?;
    let config = load_config(config_path, &fallback_log)?;

    let log = if &config.logging == fallback {
        fallback_log
    } else {
        fallback_log.close()?;
        ErrorLog::open(&config.logging)?
    };
    Ok((config, log))
}

/// Fetch and validate threat data using `config/config.yaml`.
pub fn collect() -> Result<Vec<Record>, AppError> {
    collect_at(Path::new(DEFAULT_CONFIG_PATH))
}

/// Fetch and validate threat data using the config at `config_path`.
pub fn collect_at(config_path: &Path) -> Result<Vec<Record>, AppError> {
    let (config, log) = bootstrap(config_path)?;
    let result = collect_with(&config, &log);
    log.close()?;
    result
}

/// Fetch and validate threat data over HTTP with an already loaded config.
pub fn collect_with(config: &Config, log: &ErrorLog) -> Result<Vec<Record>, AppError> {
    let factory = HttpFeedClientFactory::new(log.clone());
    collect::fetch_threat_data(config, &factory, log)
}

/// Read assets from a YAML or JSON inventory file.
///
/// The error log follows the `logging` section of the config at `config_path`.
/// A missing config falls back to the default log location.
pub fn ingest_assets_at(inventory: &Path, config_path: &Path) -> Result<Vec<Record>, AppError> {
    let settings = match load_config(config_path, &ErrorLog::disabled()) {
        Ok(config) => config.logging,
        Err(err) if err.is_not_found() => LoggingSettings::default(),
        Err(err) => {
            let log = ErrorLog::open(&LoggingSettings::default())?;
            log.error(&err.to_string());
            log.close()?;
            return Err(err.into());
        }
    };
    let log = ErrorLog::open(&settings)?;
    let mut source = FileAssetSource::new(inventory, log.clone());

    let result = assets::ingest_assets(&mut source, &log);
    log.close()?;
    result
}
