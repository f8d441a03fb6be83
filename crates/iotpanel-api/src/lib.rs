// iotpanel-api: Async Rust client for the IoT control panel backend
//
// One `ApiClient`, built from a `ClientConfig`, exposes typed wrappers for
// devices, temperature telemetry and screenshots, plus generic
// `get`/`post`/`put`/`delete` for routes without a wrapper.

pub mod client;
pub mod devices;
pub mod error;
pub mod request;
pub mod response;
pub mod sensor;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use request::{RequestOverride, ResponseType};
pub use response::{ApiResponse, Payload};
pub use sensor::ScreenshotUpload;
pub use transport::{API_KEY_HEADER, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use types::{DeviceId, ListParams, RecordId};
