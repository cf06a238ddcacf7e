pub mod configuration;
pub mod error;
pub mod record;
pub mod source;

pub use configuration::{Config, DEFAULT_CONFIG_PATH, LoggingSettings, SourceSettings};
pub use error::{ApiError, AppError, ConfigError, DataError, ErrorKind};
pub use record::{REQUIRED_KEYS, Record, Rejection, validate_batches, validate_record};
pub use source::ThreatSource;
