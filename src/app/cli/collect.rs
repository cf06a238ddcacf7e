//! Collect command implementation.

use std::path::PathBuf;

use crate::domain::AppError;

pub fn run_collect(config: Option<PathBuf>, pretty: bool) -> Result<(), AppError> {
    let config_path = super::resolve_config_path(config);
    let records = crate::app::api::collect_at(&config_path)?;
    super::print_records(&records, pretty)
}
