//! Threat feed client implementation using reqwest.

use std::error::Error as _;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use serde_json::Value;
use url::Url;

use crate::domain::ApiError;
use crate::ports::{FeedClient, FeedClientFactory};
use crate::services::ErrorLog;

/// Per-request timeout applied to every fetch.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Logged in place of a missing `Retry-After` header.
pub const UNKNOWN_RETRY_AFTER: &str = "unknown time";

/// HTTP client for one threat-intelligence API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    headers: HeaderMap,
    client: Client,
    log: ErrorLog,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.headers.keys().map(HeaderName::as_str).collect();
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("headers", &header_names)
            .field("header_values", &"[REDACTED]")
            .finish()
    }
}

impl ApiClient {
    /// Create a client with the default ten second timeout.
    pub fn new(base_url: &str, headers: &[(&str, &str)], log: ErrorLog) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, headers, log, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(
        base_url: &str,
        headers: &[(&str, &str)],
        log: ErrorLog,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let parsed = match Url::parse(base_url) {
            Ok(url) if !url.cannot_be_a_base() => url,
            Ok(_) => {
                return Err(fail(&log, ApiError::InvalidRequest(format!(
                    "base URL cannot carry a path: {base_url}"
                ))));
            }
            Err(e) => {
                return Err(fail(&log, ApiError::InvalidRequest(format!(
                    "invalid base URL '{base_url}': {e}"
                ))));
            }
        };

        let header_map = match build_headers(headers) {
            Ok(map) => map,
            Err(e) => return Err(fail(&log, e)),
        };

        let client = match Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                return Err(fail(&log, ApiError::InvalidRequest(format!(
                    "Failed to create HTTP client: {e}"
                ))));
            }
        };

        Ok(Self { base_url: parsed, headers: header_map, client, log })
    }

    /// Full request target for `endpoint`.
    pub fn endpoint_url(&self, endpoint: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(endpoint.split('/').filter(|s| !s.is_empty()));
        }
        url
    }

    fn send(&self, endpoint: &str, params: Option<&[(&str, &str)]>) -> Result<Value, ApiError> {
        let mut request = self.client.get(self.endpoint_url(endpoint)).headers(self.headers.clone());
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().map_err(|e| self.classify(e))?;
        let response = self.check_status(response)?;

        let body = response.text().map_err(|e| self.classify(e))?;
        serde_json::from_str(&body).map_err(|e| {
            self.log.error("Invalid JSON response format from API");
            ApiError::InvalidResponseFormat { details: e.to_string() }
        })
    }

    fn check_status(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or(UNKNOWN_RETRY_AFTER)
                .to_string();
            self.log.error(&format!("Rate limit exceeded. Retry after: {retry_after}"));
            return Err(ApiError::RateLimited { retry_after });
        }

        if !(status.is_client_error() || status.is_server_error()) {
            return Ok(response);
        }

        let err = match status {
            StatusCode::UNAUTHORIZED => ApiError::AuthenticationFailed,
            StatusCode::FORBIDDEN => ApiError::PermissionDenied,
            _ => ApiError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            },
        };
        self.log.error(&format!("API request failed: {} for url {}", status, response.url()));
        Err(err)
    }

    fn classify(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            self.log.error("API request timed out");
            return ApiError::Timeout;
        }

        let details = error_chain(&err);
        if err.is_connect() {
            self.log.error(&format!("Connection error occurred: {details}"));
            ApiError::Connection { details }
        } else {
            self.log.error(&format!("API request failed: {details}"));
            ApiError::Transport(details)
        }
    }
}

impl FeedClient for ApiClient {
    fn get_data(
        &self,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<Value, ApiError> {
        self.send(endpoint, params)
    }
}

/// Creates [`ApiClient`]s that share one error log.
#[derive(Debug, Clone)]
pub struct HttpFeedClientFactory {
    log: ErrorLog,
    timeout: Duration,
}

impl HttpFeedClientFactory {
    pub fn new(log: ErrorLog) -> Self {
        Self { log, timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS) }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl FeedClientFactory for HttpFeedClientFactory {
    fn create(
        &self,
        base_url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Box<dyn FeedClient>, ApiError> {
        let client = ApiClient::with_timeout(base_url, headers, self.log.clone(), self.timeout)?;
        Ok(Box::new(client))
    }
}

fn build_headers(headers: &[(&str, &str)]) -> Result<HeaderMap, ApiError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::InvalidRequest(format!("invalid header name '{name}': {e}")))?;
        let mut value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid value for header '{name}': {e}")))?;
        value.set_sensitive(true);
        map.insert(name, value);
    }
    Ok(map)
}

fn fail(log: &ErrorLog, err: ApiError) -> ApiError {
    log.error(&err.to_string());
    err
}

/// Render an error with its source chain, since reqwest hides the root cause.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
