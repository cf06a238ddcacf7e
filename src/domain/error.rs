use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure family an [`AppError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport or upstream API failure. Recoverable at the aggregation boundary.
    Api,
    /// Configuration failure. Fatal to the run.
    Config,
    /// Structural corruption in fetched data. Fatal to the run.
    Data,
    /// Local I/O failure outside configuration loading.
    Io,
    /// Asset source plugin used out of lifecycle order.
    Plugin,
}

/// Transport/API failures raised by the fetch wrapper.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Upstream signalled HTTP 429.
    #[error("Rate limit exceeded.")]
    RateLimited { retry_after: String },

    /// Request did not complete within the client timeout.
    #[error("API request timed out")]
    Timeout,

    /// Upstream rejected the credentials (HTTP 401).
    #[error("Authentication failed.")]
    AuthenticationFailed,

    /// Upstream refused access to the resource (HTTP 403).
    #[error("Permission denied.")]
    PermissionDenied,

    /// Any other 4xx/5xx status.
    #[error("API request failed: {status} {reason}")]
    Status { status: u16, reason: String },

    /// Connection could not be established (refused, DNS, reset).
    #[error("Connection error occurred.")]
    Connection { details: String },

    /// Other communication fault.
    #[error("API request failed: {0}")]
    Transport(String),

    /// Response body is not valid JSON.
    #[error("Invalid response format.")]
    InvalidResponseFormat { details: String },

    /// Request could not be built (bad base address or header).
    #[error("Invalid API request: {0}")]
    InvalidRequest(String),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file does not exist.
    #[error("Configuration file not found: {}.", path.display())]
    NotFound { path: PathBuf },

    /// Config file is not a well-formed YAML document.
    #[error("Configuration file error: {0}.")]
    Parse(String),

    /// Config file exists but cannot be read by this process.
    #[error("Permission denied for config file.")]
    PermissionDenied,

    /// Any other I/O fault while reading the config file.
    #[error("Disk space issue while loading configuration.")]
    Storage(#[source] io::Error),
}

impl ConfigError {
    /// Whether the config file was missing, as opposed to present but unusable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound { .. })
    }
}

/// Data-integrity failures raised by record validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("Unexpected data type received.")]
    UnexpectedDataType,

    #[error("Corrupt data received.")]
    CorruptData,

    #[error("Missing required data keys.")]
    MissingRequiredKeys,
}

/// Library-wide error type for intelsiem operations.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Asset source used before `connect` succeeded.
    #[error("Asset source '{0}' is not connected")]
    NotConnected(String),
}

impl AppError {
    /// Which failure family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Api(_) => ErrorKind::Api,
            AppError::Config(_) => ErrorKind::Config,
            AppError::Data(_) => ErrorKind::Data,
            AppError::Io(_) => ErrorKind::Io,
            AppError::NotConnected(_) => ErrorKind::Plugin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_messages() {
        assert_eq!(
            ApiError::RateLimited { retry_after: "5".into() }.to_string(),
            "Rate limit exceeded."
        );
        assert_eq!(ApiError::Timeout.to_string(), "API request timed out");
        assert_eq!(
            ApiError::InvalidResponseFormat { details: "eof".into() }.to_string(),
            "Invalid response format."
        );
        assert_eq!(
            ApiError::Status { status: 502, reason: "Bad Gateway".into() }.to_string(),
            "API request failed: 502 Bad Gateway"
        );
    }

    #[test]
    fn config_error_messages() {
        let err = ConfigError::NotFound { path: PathBuf::from("config/missing.yaml") };
        assert_eq!(err.to_string(), "Configuration file not found: config/missing.yaml.");
        assert!(err.is_not_found());
        assert!(!ConfigError::PermissionDenied.is_not_found());
        assert_eq!(ConfigError::PermissionDenied.to_string(), "Permission denied for config file.");
    }

    #[test]
    fn data_error_messages() {
        assert_eq!(DataError::UnexpectedDataType.to_string(), "Unexpected data type received.");
        assert_eq!(DataError::CorruptData.to_string(), "Corrupt data received.");
        assert_eq!(DataError::MissingRequiredKeys.to_string(), "Missing required data keys.");
    }

    #[test]
    fn app_error_kind_follows_family() {
        assert_eq!(AppError::from(ApiError::Timeout).kind(), ErrorKind::Api);
        assert_eq!(AppError::from(ConfigError::PermissionDenied).kind(), ErrorKind::Config);
        assert_eq!(AppError::from(DataError::CorruptData).kind(), ErrorKind::Data);
        assert_eq!(AppError::NotConnected("inventory".into()).kind(), ErrorKind::Plugin);
    }

    #[test]
    fn app_error_is_transparent() {
        let err: AppError = DataError::MissingRequiredKeys.into();
        assert_eq!(err.to_string(), "Missing required data keys.");
    }
}
