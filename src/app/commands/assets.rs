//! Asset ingestion through an [`AssetSourcePlugin`].

use crate::domain::{AppError, Record};
use crate::ports::AssetSourcePlugin;
use crate::services::ErrorLog;

/// Run one connect → fetch → disconnect cycle against `plugin`.
///
/// `disconnect` runs whenever `connect` succeeded, even if fetching fails.
pub fn ingest_assets(
    plugin: &mut dyn AssetSourcePlugin,
    log: &ErrorLog,
) -> Result<Vec<Record>, AppError> {
    if let Err(err) = plugin.connect() {
        log.error(&format!("Failed to connect to asset source {}: {err}", plugin.name()));
        return Err(err);
    }

    let result = plugin.fetch_assets();
    plugin.disconnect();

    result.inspect_err(|err| {
        log.error(&format!("Failed to fetch assets from {}: {err}", plugin.name()));
    })
}
