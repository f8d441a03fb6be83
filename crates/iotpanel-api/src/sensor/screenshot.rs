// Screenshot records: JSON metadata listing, binary image fetches, and
// multipart upload.

use bytes::Bytes;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use super::with_params;
use crate::client::{ApiClient, Body};
use crate::error::Error;
use crate::request::{RequestOverride, ResponseType};
use crate::response::ApiResponse;
use crate::types::{DeviceId, ListParams, RecordId};

const SCREENSHOT_PATH: &str = "/sensor/screenshot";

/// Fields of a screenshot upload. Every field is optional; absent or empty
/// fields are left out of the form entirely.
#[derive(Debug, Clone, Default)]
pub struct ScreenshotUpload {
    pub device_id: Option<DeviceId>,
    /// Image format, e.g. `png` or `jpeg`.
    pub format: Option<String>,
    pub image: Option<Bytes>,
}

impl ScreenshotUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device_id(mut self, device_id: impl Into<DeviceId>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn image(mut self, image: impl Into<Bytes>) -> Self {
        self.image = Some(image.into());
        self
    }

    fn present_device_id(&self) -> Option<&str> {
        self.device_id
            .as_ref()
            .map(DeviceId::as_str)
            .filter(|s| !s.is_empty())
    }

    fn present_format(&self) -> Option<&str> {
        self.format.as_deref().filter(|s| !s.is_empty())
    }

    fn present_image(&self) -> Option<&Bytes> {
        self.image.as_ref().filter(|b| !b.is_empty())
    }

    /// Names of the form fields that will be sent, in order.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(3);
        if self.present_device_id().is_some() {
            names.push("device_id");
        }
        if self.present_format().is_some() {
            names.push("format");
        }
        if self.present_image().is_some() {
            names.push("image");
        }
        names
    }

    /// Build the multipart form.
    ///
    /// `format` is sent verbatim as a text field. The image part is typed
    /// `image/<format>` only when `format` is a bare MIME subtype such as
    /// `png` or `svg+xml`; anything else falls back to
    /// `application/octet-stream`, so no `format` value can fail the upload.
    pub fn into_form(self) -> Result<Form, Error> {
        let mut form = Form::new();

        if let Some(device_id) = self.present_device_id() {
            form = form.text("device_id", device_id.to_owned());
        }
        let format = self.present_format().map(str::to_owned);
        if let Some(ref format) = format {
            form = form.text("format", format.clone());
        }
        if let Some(image) = self.present_image() {
            let subtype = format.as_deref().filter(|f| is_mime_subtype(f));
            let (file_name, mime) = match subtype {
                Some(sub) => (format!("screenshot.{sub}"), format!("image/{sub}")),
                None => ("screenshot".to_owned(), OCTET_STREAM.to_owned()),
            };
            let len = u64::try_from(image.len()).unwrap_or(u64::MAX);
            let part = Part::stream_with_length(reqwest::Body::from(image.clone()), len)
                .file_name(file_name)
                .mime_str(&mime)?;
            form = form.part("image", part);
        }

        Ok(form)
    }
}

const OCTET_STREAM: &str = "application/octet-stream";

/// RFC 6838 restricted-name: alphanumerics plus `!#$&-^_.+`.
fn is_mime_subtype(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 127
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$&-^_.+".contains(&b))
}

impl ApiClient {
    /// `GET /sensor/screenshot`: metadata only, decoded as JSON.
    pub async fn get_screenshot_list(
        &self,
        params: &ListParams,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        self.get(SCREENSHOT_PATH, with_params(overrides, params))
            .await
    }

    /// `GET /sensor/screenshot/{id}`: the raw image bytes.
    pub async fn get_screenshot_by_id(
        &self,
        id: &RecordId,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        self.get(
            &format!("{SCREENSHOT_PATH}/{id}"),
            overrides.response_type(ResponseType::Binary),
        )
        .await
    }

    /// `GET /sensor/screenshot/latest`: the raw image bytes of the newest record.
    pub async fn get_screenshot_latest(
        &self,
        params: &ListParams,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        self.get(
            &format!("{SCREENSHOT_PATH}/latest"),
            with_params(overrides, params).response_type(ResponseType::Binary),
        )
        .await
    }

    /// `POST /sensor/screenshot` as `multipart/form-data`.
    ///
    /// The content type is always multipart, whatever `overrides` says;
    /// every other override header is sent as given.
    pub async fn post_screenshot(
        &self,
        upload: ScreenshotUpload,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        let body = match upload.into_form() {
            Ok(form) => Body::Multipart(form),
            Err(e) => return self.observe(Err(e)),
        };
        self.send(Method::POST, SCREENSHOT_PATH, body, overrides)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_omitted_when_absent() {
        let upload = ScreenshotUpload::new()
            .device_id("d1")
            .image(Bytes::from_static(b"\x89PNG"));
        assert_eq!(upload.field_names(), vec!["device_id", "image"]);
    }

    #[test]
    fn empty_upload_has_no_fields() {
        assert!(ScreenshotUpload::new().field_names().is_empty());
    }

    #[test]
    fn empty_values_count_as_absent() {
        let upload = ScreenshotUpload::new()
            .device_id("")
            .format("")
            .image(Vec::new());
        assert!(upload.field_names().is_empty());
    }

    #[test]
    fn all_fields_in_order() {
        let upload = ScreenshotUpload::new()
            .image(vec![1_u8, 2, 3])
            .format("png")
            .device_id(7_u64);
        assert_eq!(upload.field_names(), vec!["device_id", "format", "image"]);
        assert!(upload.into_form().is_ok());
    }

    #[test]
    fn only_bare_subtypes_type_the_image() {
        assert!(is_mime_subtype("png"));
        assert!(is_mime_subtype("svg+xml"));
        assert!(!is_mime_subtype("image/png"));
        assert!(!is_mime_subtype("png file"));
        assert!(!is_mime_subtype("svg+xml;v=2"));
        assert!(!is_mime_subtype(""));
    }

    #[test]
    fn free_form_format_still_builds() {
        for format in ["image/png", "PNG file", "svg+xml;v=2"] {
            let upload = ScreenshotUpload::new().format(format).image(vec![1_u8]);
            assert!(upload.into_form().is_ok(), "format {format:?}");
        }
    }
}
