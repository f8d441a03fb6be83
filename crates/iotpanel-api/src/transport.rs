// Client configuration and reqwest::Client construction.
//
// One `ClientConfig` describes the whole process-wide transport: base URL,
// timeout, default headers, and whether failures are logged. It is decided
// once at construction and never mutated by a request.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Backend the control panel talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Request timeout applied to every call unless overridden per call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the backend API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Shared transport configuration for building the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every relative path is resolved against.
    pub base_url: String,
    pub timeout: Duration,
    /// Headers sent on every request. Per-call headers win on conflict.
    pub default_headers: Vec<(String, String)>,
    /// Optional API key, sent as a sensitive `X-API-Key` default header.
    pub api_key: Option<SecretString>,
    /// Log every failed call through `tracing` before returning it.
    pub log_failures: bool,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: vec![("Content-Type".into(), "application/json".into())],
            api_key: None,
            log_failures: false,
            user_agent: concat!("iotpanel/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl ClientConfig {
    /// Config pointed at `base_url`, everything else default.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    pub fn with_log_failures(mut self, enabled: bool) -> Self {
        self.log_failures = enabled;
        self
    }

    /// Add (or replace) a default header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.default_headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.default_headers.push((name, value.into()));
        self
    }

    /// The full default header map, including the JSON content type and API key.
    pub fn header_map(&self) -> Result<HeaderMap, Error> {
        let mut headers = header_map(&self.default_headers)?;
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        if let Some(ref key) = self.api_key {
            let mut value =
                HeaderValue::from_str(key.expose_secret()).map_err(|e| Error::InvalidHeader {
                    name: API_KEY_HEADER.into(),
                    reason: e.to_string(),
                })?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        Ok(headers)
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .default_headers(self.header_map()?)
            .build()?;
        Ok(client)
    }
}

/// Convert name/value pairs into a `HeaderMap`. Later pairs replace earlier ones.
pub(crate) fn header_map(pairs: &[(String, String)]) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
