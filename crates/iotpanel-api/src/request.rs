// Per-call request options layered over the client defaults.

use std::time::Duration;

/// How the response body is decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseType {
    /// Parse as JSON (empty bodies become `null`).
    #[default]
    Json,
    /// Keep as UTF-8 text.
    Text,
    /// Keep the raw bytes. Used for screenshot images.
    Binary,
}

/// Optional per-call configuration merged over [`ClientConfig`](crate::ClientConfig).
///
/// Caller-supplied headers take precedence over the client's default
/// headers. Query pairs are appended to the URL in order.
#[derive(Debug, Clone, Default)]
pub struct RequestOverride {
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub response_type: ResponseType,
    /// Replaces the client-wide timeout for this call only.
    pub timeout: Option<Duration>,
}

impl RequestOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
