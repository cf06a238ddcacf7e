mod api_client;
mod error_log;
mod file_asset_source;
mod rotating_file;

pub use api_client::{ApiClient, DEFAULT_TIMEOUT_SECS, HttpFeedClientFactory, UNKNOWN_RETRY_AFTER};
pub use error_log::{ErrorLog, parse_level};
pub use file_asset_source::FileAssetSource;
pub use rotating_file::RotatingFile;
