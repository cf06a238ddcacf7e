//! Assets command implementation.

use std::path::{Path, PathBuf};

use crate::domain::AppError;

pub fn run_assets(inventory: &Path, config: Option<PathBuf>, pretty: bool) -> Result<(), AppError> {
    let config_path = super::resolve_config_path(config);
    let assets = crate::app::api::ingest_assets_at(inventory, &config_path)?;
    super::print_records(&assets, pretty)
}
