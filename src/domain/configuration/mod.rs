pub mod config;

pub use config::{Config, DEFAULT_CONFIG_PATH, DEFAULT_PAGE_SIZE, LoggingSettings, SourceSettings};
