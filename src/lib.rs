//! intelsiem: collect threat-intelligence records from external feeds and validate their shape.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{bootstrap, bootstrap_with, collect, collect_at, collect_with, ingest_assets_at};
pub use app::cli::resolve_config_path;
pub use app::commands::assets::ingest_assets;
pub use app::commands::collect::fetch_threat_data;
pub use app::config::{load_config, parse_config_content};
pub use domain::{
    ApiError, AppError, Config, ConfigError, DataError, ErrorKind, LoggingSettings, Record,
    ThreatSource, validate_batches,
};
pub use ports::{AssetSourcePlugin, FeedClient, FeedClientFactory};
pub use services::{ApiClient, ErrorLog, FileAssetSource, HttpFeedClientFactory};
