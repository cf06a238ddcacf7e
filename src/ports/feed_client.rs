//! Threat feed client port definition.

use serde_json::Value;

use crate::domain::ApiError;

/// Port for one upstream threat feed.
pub trait FeedClient {
    /// Issue one GET against `endpoint` and return the decoded JSON body.
    fn get_data(&self, endpoint: &str, params: Option<&[(&str, &str)]>)
    -> Result<Value, ApiError>;
}

/// Builds a feed client for a base address and its request headers.
pub trait FeedClientFactory {
    fn create(
        &self,
        base_url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Box<dyn FeedClient>, ApiError>;
}
