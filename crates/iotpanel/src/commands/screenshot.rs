//! Screenshot command handlers.

use std::path::{Path, PathBuf};

use iotpanel_api::{ApiResponse, RecordId, ScreenshotUpload};

use crate::cli::{ScreenshotArgs, ScreenshotCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

pub async fn handle(args: ScreenshotArgs, ctx: &Context) -> Result<(), CliError> {
    match args.command {
        ScreenshotCommand::List(filter) => {
            let params = util::list_params(&filter)?;
            let resp = ctx
                .client
                .get_screenshot_list(&params, ctx.overrides())
                .await?;
            ctx.print(&resp)
        }
        ScreenshotCommand::Latest { filter, out } => {
            let params = util::list_params(&filter)?;
            let resp = ctx
                .client
                .get_screenshot_latest(&params, ctx.overrides())
                .await?;
            save_image(&resp, out.as_deref(), ctx)
        }
        ScreenshotCommand::Get { id, out } => {
            let resp = ctx
                .client
                .get_screenshot_by_id(&RecordId::from(id), ctx.overrides())
                .await?;
            save_image(&resp, out.as_deref(), ctx)
        }
        ScreenshotCommand::Upload {
            device,
            format,
            image,
        } => {
            let upload = build_upload(device, format, image)?;
            tracing::debug!(fields = ?upload.field_names(), "uploading screenshot");
            let resp = ctx.client.post_screenshot(upload, ctx.overrides()).await?;
            ctx.print(&resp)
        }
    }
}

fn save_image(resp: &ApiResponse, out: Option<&Path>, ctx: &Context) -> Result<(), CliError> {
    let Some(bytes) = resp.bytes() else {
        return ctx.print(resp);
    };
    if out.is_none() && ctx.quiet {
        return Ok(());
    }
    output::write_binary(bytes, out)?;
    if let Some(path) = out {
        if !ctx.quiet {
            eprintln!("Saved {} bytes to {}", bytes.len(), path.display());
        }
    }
    Ok(())
}

/// Image format from an explicit flag, else the file extension.
fn resolve_format(format: Option<String>, image: Option<&Path>) -> Option<String> {
    format.or_else(|| {
        image
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .map(|ext| match ext.to_ascii_lowercase().as_str() {
                "jpg" => "jpeg".to_owned(),
                other => other.to_owned(),
            })
    })
}

fn build_upload(
    device: Option<String>,
    format: Option<String>,
    image: Option<PathBuf>,
) -> Result<ScreenshotUpload, CliError> {
    let format = resolve_format(format, image.as_deref());
    let mut upload = ScreenshotUpload::new();
    if let Some(device) = device {
        upload = upload.device_id(device);
    }
    if let Some(format) = format {
        upload = upload.format(format);
    }
    if let Some(path) = image {
        upload = upload.image(std::fs::read(&path)?);
    }
    Ok(upload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_falls_back_to_extension() {
        assert_eq!(
            resolve_format(None, Some(Path::new("shot.JPG"))),
            Some("jpeg".to_owned())
        );
        assert_eq!(
            resolve_format(Some("webp".into()), Some(Path::new("shot.png"))),
            Some("webp".to_owned())
        );
        assert_eq!(resolve_format(None, Some(Path::new("shot"))), None);
        assert_eq!(resolve_format(None, None), None);
    }

    #[test]
    fn upload_without_inputs_is_empty() {
        let upload = build_upload(None, None, None).unwrap();
        assert!(upload.field_names().is_empty());
    }

    #[test]
    fn upload_reads_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        std::fs::write(&path, b"\x89PNG").unwrap();

        let upload = build_upload(Some("cam1".into()), None, Some(path)).unwrap();
        assert_eq!(upload.field_names(), vec!["device_id", "format", "image"]);
        assert_eq!(upload.format.as_deref(), Some("png"));
    }
}
