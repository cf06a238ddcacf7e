//! Threat data collection across all configured sources.

use serde_json::Value;

use crate::domain::{AppError, Config, DataError, Record, ThreatSource, validate_batches};
use crate::ports::{FeedClient, FeedClientFactory};
use crate::services::ErrorLog;

/// Fetch threat data from every source and return the combined, validated result.
///
/// Batches are concatenated in [`ThreatSource::ALL`] order. If any source raises an
/// API failure the whole result collapses to an empty list; configuration and
/// data-integrity failures propagate. A source without a usable API key is
/// reported as corrupt data.
pub fn fetch_threat_data(
    config: &Config,
    factory: &dyn FeedClientFactory,
    log: &ErrorLog,
) -> Result<Vec<Record>, AppError> {
    let batches = match fetch_batches(config, factory, log) {
        Ok(batches) => batches,
        Err(AppError::Api(err)) => {
            log.error(&format!("Failed to fetch threat data: {err}"));
            return Ok(Vec::new());
        }
        Err(err) => return Err(err),
    };

    validate_batches(&batches).map_err(|rejection| {
        log.error(&rejection.detail);
        AppError::Data(rejection.error)
    })
}

fn fetch_batches(
    config: &Config,
    factory: &dyn FeedClientFactory,
    log: &ErrorLog,
) -> Result<Vec<Value>, AppError> {
    let mut clients: Vec<(ThreatSource, Box<dyn FeedClient>)> = Vec::new();
    for source in ThreatSource::ALL {
        let Some(api_key) = config.api_key(source) else {
            log.error(&format!(
                "Data error occurred: no usable key at 'api_keys.{}'",
                source.config_key()
            ));
            return Err(DataError::CorruptData.into());
        };
        let client =
            factory.create(config.base_url(source), &[(source.auth_header(), api_key.as_str())])?;
        clients.push((source, client));
    }

    let mut batches = Vec::with_capacity(clients.len());
    for (source, client) in &clients {
        let batch = if source.is_paged() {
            let limit = config.page_size(*source).to_string();
            client.get_data(source.endpoint(), Some(&[("limit", limit.as_str())]))?
        } else {
            client.get_data(source.endpoint(), None)?
        };
        batches.push(batch);
    }
    Ok(batches)
}
