// Sensor endpoints under /sensor/: temperature telemetry and screenshots.

pub mod screenshot;
pub mod temperature;

pub use screenshot::ScreenshotUpload;

use crate::request::RequestOverride;
use crate::types::ListParams;

/// Apply list params as the query string, replacing any query in `overrides`.
pub(crate) fn with_params(mut overrides: RequestOverride, params: &ListParams) -> RequestOverride {
    overrides.query = params.to_pairs();
    overrides
}
