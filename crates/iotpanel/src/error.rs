//! CLI error types with miette diagnostics.
//!
//! Maps `iotpanel_api::Error` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use iotpanel_api::Error as ApiError;
use iotpanel_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to backend at {url}")]
    #[diagnostic(
        code(iotpanel::connection_failed),
        help(
            "Check that the backend is running and accessible.\n\
             URL: {url}\n\
             Try: iotpanel health --base-url http://127.0.0.1:5000"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: ApiError,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(iotpanel::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout {
        #[source]
        source: ApiError,
    },

    // ── HTTP ─────────────────────────────────────────────────────────

    #[error("Request rejected (HTTP {status}): {message}")]
    #[diagnostic(
        code(iotpanel::auth_failed),
        help(
            "Verify your API key.\n\
             Pass --api-key, set IOTPANEL_API_KEY, or run: iotpanel config set-key"
        )
    )]
    AuthFailed { status: u16, message: String },

    #[error("Not found: {message}")]
    #[diagnostic(code(iotpanel::not_found))]
    NotFound { message: String },

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(iotpanel::api_error))]
    Api { status: u16, message: String },

    #[error(transparent)]
    #[diagnostic(code(iotpanel::request))]
    Request(ApiError),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(iotpanel::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(iotpanel::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: iotpanel config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(iotpanel::config))]
    Config(#[from] ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(iotpanel::json), help("Check the JSON payload and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::Config(ConfigError::Validation { .. }) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ApiError → CliError mapping ──────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http {
                status: status @ (401 | 403),
                message,
            } => CliError::AuthFailed { status, message },
            ApiError::Http {
                status: 404,
                message,
            } => CliError::NotFound { message },
            ApiError::Http { status, message } => CliError::Api { status, message },
            ApiError::InvalidHeader { name, reason } => CliError::Validation {
                field: format!("header {name}"),
                reason,
            },
            other if other.is_timeout() => CliError::Timeout { source: other },
            other if other.is_connect() => CliError::ConnectionFailed {
                url: connect_url(&other),
                source: other,
            },
            other => CliError::Request(other),
        }
    }
}

fn connect_url(err: &ApiError) -> String {
    match err {
        ApiError::Transport(e) => e
            .url()
            .map_or_else(|| "(unknown)".into(), ToString::to_string),
        _ => "(unknown)".into(),
    }
}
