use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::domain::ApiError;
use crate::ports::{FeedClient, FeedClientFactory};

/// Canned response for one base address.
#[derive(Debug, Clone)]
pub enum FakeFeed {
    Ok(Value),
    Err(ApiError),
}

impl FakeFeed {
    pub fn ok(body: Value) -> Self {
        FakeFeed::Ok(body)
    }

    pub fn err(error: ApiError) -> Self {
        FakeFeed::Err(error)
    }
}

/// One recorded `get_data` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedCall {
    pub base_url: String,
    pub headers: Vec<(String, String)>,
    pub endpoint: String,
    pub params: Option<Vec<(String, String)>>,
}

#[derive(Default)]
pub struct FakeFeedFactory {
    feeds: HashMap<String, FakeFeed>,
    calls: Arc<Mutex<Vec<FeedCall>>>,
}

impl FakeFeedFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, base_url: &str, feed: FakeFeed) -> Self {
        self.feeds.insert(base_url.to_string(), feed);
        self
    }

    pub fn calls(&self) -> Vec<FeedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl FeedClientFactory for FakeFeedFactory {
    fn create(
        &self,
        base_url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Box<dyn FeedClient>, ApiError> {
        let feed = self
            .feeds
            .get(base_url)
            .cloned()
            .ok_or_else(|| ApiError::InvalidRequest(format!("no fake feed for {base_url}")))?;

        Ok(Box::new(FakeFeedClient {
            base_url: base_url.to_string(),
            headers: owned_pairs(headers),
            feed,
            calls: Arc::clone(&self.calls),
        }))
    }
}

struct FakeFeedClient {
    base_url: String,
    headers: Vec<(String, String)>,
    feed: FakeFeed,
    calls: Arc<Mutex<Vec<FeedCall>>>,
}

impl FeedClient for FakeFeedClient {
    fn get_data(
        &self,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(FeedCall {
            base_url: self.base_url.clone(),
            headers: self.headers.clone(),
            endpoint: endpoint.to_string(),
            params: params.map(owned_pairs),
        });

        match &self.feed {
            FakeFeed::Ok(body) => Ok(body.clone()),
            FakeFeed::Err(error) => Err(error.clone()),
        }
    }
}

fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}
