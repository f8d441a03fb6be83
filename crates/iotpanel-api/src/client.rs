// HTTP client facade for the control panel backend.
//
// Owns one configured `reqwest::Client` and exposes the generic verbs every
// resource wrapper (devices, temperature, screenshots) is built on. Resource
// wrappers live in sibling modules as inherent methods so this file stays
// focused on transport mechanics: URL resolution, header merging, response
// decoding, and the failure observer.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use crate::error::Error;
use crate::request::{RequestOverride, ResponseType};
use crate::response::{ApiResponse, Payload};
use crate::transport::{ClientConfig, header_map};

// ── Error response shape from the backend ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Request body variants the facade knows how to send.
pub(crate) enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

impl Body {
    fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, Error> {
        match serde_json::to_value(body)? {
            serde_json::Value::Null => Ok(Self::Empty),
            value => Ok(Self::Json(value)),
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the control panel REST backend.
///
/// Construct once per process and pass it to whoever needs the backend.
/// Cloning is cheap: the connection pool and configuration are shared, and
/// no request ever mutates either, so clones can be used concurrently from
/// any task.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build the HTTP client from `config` (timeout, default headers, API key).
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages timeout and default headers).
    pub fn from_reqwest(config: ClientConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Resolve `path` against the base URL.
    ///
    /// Absolute `http(s)://` URLs are used as given. Relative paths are
    /// appended to the base with exactly one `/` between them, so a base
    /// URL carrying a path prefix keeps it.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        combine_url(&self.config.base_url, path)
    }

    // ── Generic verbs ────────────────────────────────────────────────

    pub async fn get(&self, path: &str, overrides: RequestOverride) -> Result<ApiResponse, Error> {
        self.send(Method::GET, path, Body::Empty, overrides).await
    }

    /// POST a JSON body. A body serializing to `null` sends no body at all.
    pub async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        let body = match Body::json(body) {
            Ok(body) => body,
            Err(e) => return self.observe(Err(e)),
        };
        self.send(Method::POST, path, body, overrides).await
    }

    pub async fn put<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        let body = match Body::json(body) {
            Ok(body) => body,
            Err(e) => return self.observe(Err(e)),
        };
        self.send(Method::PUT, path, body, overrides).await
    }

    pub async fn delete(
        &self,
        path: &str,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        self.send(Method::DELETE, path, Body::Empty, overrides).await
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Issue one request and pass the outcome through the failure observer.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        body: Body,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        let result = self.dispatch(method, path, body, overrides).await;
        self.observe(result)
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Body,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        let url = self.url(path)?;
        debug!("{method} {url} query={:?}", overrides.query);

        let mut headers = header_map(&overrides.headers)?;
        let mut req = self.http.request(method, url);

        if !overrides.query.is_empty() {
            req = req.query(&overrides.query);
        }
        if let Some(timeout) = overrides.timeout {
            req = req.timeout(timeout);
        }

        // Per-request headers win over client defaults; reqwest only fills
        // in defaults for names the request does not already carry.
        req = match body {
            Body::Empty => req.headers(headers),
            Body::Json(json) => req.headers(headers).json(&json),
            Body::Multipart(form) => {
                headers.remove(CONTENT_TYPE);
                req.headers(headers).multipart(form)
            }
        };

        let resp = req.send().await?;
        handle_response(resp, overrides.response_type).await
    }

    // ── Failure observer ─────────────────────────────────────────────

    /// Log a failed call when `log_failures` is set. Never alters the result.
    pub(crate) fn observe<T>(&self, result: Result<T, Error>) -> Result<T, Error> {
        if self.config.log_failures {
            if let Err(ref err) = result {
                error!(status = err.status(), "API error: {err}");
            }
        }
        result
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response(
    resp: reqwest::Response,
    response_type: ResponseType,
) -> Result<ApiResponse, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(parse_error(status, resp).await);
    }

    let headers = resp.headers().clone();
    let payload = match response_type {
        ResponseType::Binary => Payload::Binary(resp.bytes().await?),
        ResponseType::Text => Payload::Text(resp.text().await?),
        ResponseType::Json => {
            let body = resp.text().await?;
            if body.trim().is_empty() {
                Payload::Json(serde_json::Value::Null)
            } else {
                let value = serde_json::from_str(&body).map_err(|e| {
                    let preview: String = body.chars().take(200).collect();
                    Error::Deserialization {
                        message: format!("{e} (body preview: {preview:?})"),
                        body: body.clone(),
                    }
                })?;
                Payload::Json(value)
            }
        }
    };

    Ok(ApiResponse {
        status,
        headers,
        payload,
    })
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = match resp.text().await {
        Ok(raw) => raw,
        Err(e) => {
            debug!(status = status.as_u16(), "failed to read error body: {e}");
            String::new()
        }
    };
    let fallback = || {
        status
            .canonical_reason()
            .map_or_else(|| status.to_string(), str::to_owned)
    };

    let message = match serde_json::from_str::<ErrorResponse>(&raw) {
        Ok(err) => err.message.or(err.error).unwrap_or_else(fallback),
        Err(_) if raw.trim().is_empty() => fallback(),
        Err(_) => raw,
    };

    Error::Http {
        status: status.as_u16(),
        message,
    }
}

// ── URL helpers ──────────────────────────────────────────────────────

fn is_absolute(path: &str) -> bool {
    let lower = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

pub(crate) fn combine_url(base: &str, path: &str) -> Result<Url, Error> {
    if is_absolute(path) {
        return Ok(Url::parse(path)?);
    }
    if path.is_empty() {
        return Ok(Url::parse(base)?);
    }
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_append_to_base() {
        let url = combine_url("http://127.0.0.1:5000", "/health").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/health");
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let url = combine_url("http://host/api/", "/devices/7").unwrap();
        assert_eq!(url.as_str(), "http://host/api/devices/7");

        let url = combine_url("http://host/api", "devices").unwrap();
        assert_eq!(url.as_str(), "http://host/api/devices");
    }

    #[test]
    fn absolute_urls_bypass_base() {
        let url = combine_url("http://127.0.0.1:5000", "HTTPS://other.example/x").unwrap();
        assert_eq!(url.as_str(), "https://other.example/x");
    }

    #[test]
    fn empty_path_is_base() {
        let url = combine_url("http://127.0.0.1:5000", "").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn invalid_base_is_an_error() {
        assert!(matches!(
            combine_url("not a url", "/health"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn null_body_sends_nothing() {
        assert!(matches!(Body::json(&()), Ok(Body::Empty)));
        assert!(matches!(
            Body::json(&serde_json::json!({"on": true})),
            Ok(Body::Json(_))
        ));
    }
}
