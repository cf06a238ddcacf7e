//! Asset ingestion plugin port.

use crate::domain::{AppError, Record};

/// Capability interface for a source of asset inventory data.
///
/// Implementations own their connection state; callers drive the lifecycle
/// `connect` → `fetch_assets` → `disconnect`.
pub trait AssetSourcePlugin {
    /// Human-readable name used in log lines.
    fn name(&self) -> &str;

    /// Establish a connection to the asset source.
    ///
    /// Fails when configuration or credentials are missing, or the source is unreachable.
    fn connect(&mut self) -> Result<(), AppError>;

    /// Fetch asset records. Each asset carries at least an `id`, typically with
    /// fields such as `hostname` and `ip_address`.
    fn fetch_assets(&mut self) -> Result<Vec<Record>, AppError>;

    /// Release any connection or file handle held by the plugin.
    fn disconnect(&mut self);
}
