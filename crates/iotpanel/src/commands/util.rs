//! Shared helpers for command handlers.

use std::path::Path;

use iotpanel_api::{ListParams, RequestOverride};

use crate::cli::{DeviceFilterArgs, GlobalOpts, PayloadArgs};
use crate::error::CliError;

/// Split `"Name: value"` (or `"Name=value"`) into its parts.
pub fn parse_header(raw: &str) -> Result<(String, String), CliError> {
    let (name, value) = raw
        .split_once(':')
        .or_else(|| raw.split_once('='))
        .ok_or_else(|| CliError::Validation {
            field: "header".into(),
            reason: format!("expected \"Name: value\", got '{raw}'"),
        })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::Validation {
            field: "header".into(),
            reason: format!("missing header name in '{raw}'"),
        });
    }
    Ok((name.to_owned(), value.trim().to_owned()))
}

/// Split `"key=value"` into its parts.
pub fn parse_param(raw: &str) -> Result<(String, String), CliError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(CliError::Validation {
            field: "param".into(),
            reason: format!("expected key=value, got '{raw}'"),
        }),
    }
}

/// Per-call overrides from the global `--header` flags.
pub fn overrides(global: &GlobalOpts) -> Result<RequestOverride, CliError> {
    let mut overrides = RequestOverride::new();
    for raw in &global.headers {
        let (name, value) = parse_header(raw)?;
        overrides = overrides.header(name, value);
    }
    Ok(overrides)
}

/// Query pairs from repeated `--param key=value` flags.
pub fn query_pairs(params: &[String]) -> Result<Vec<(String, String)>, CliError> {
    params.iter().map(|raw| parse_param(raw)).collect()
}

/// `ListParams` from `--device` and `--param` flags.
pub fn list_params(filter: &DeviceFilterArgs) -> Result<ListParams, CliError> {
    Ok(ListParams {
        device_id: filter.device.clone().map(Into::into),
        extra: query_pairs(&filter.params)?,
    })
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// The payload from `--data` or `--from-file`, if either was given.
pub fn read_payload(args: &PayloadArgs) -> Result<Option<serde_json::Value>, CliError> {
    if let Some(ref inline) = args.data {
        return Ok(Some(serde_json::from_str(inline)?));
    }
    args.from_file.as_deref().map(read_json_file).transpose()
}

/// Like [`read_payload`], for commands where a body is mandatory.
pub fn require_payload(args: &PayloadArgs) -> Result<serde_json::Value, CliError> {
    read_payload(args)?.ok_or_else(|| CliError::Validation {
        field: "payload".into(),
        reason: "provide --data or --from-file".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_accept_colon_or_equals() {
        assert_eq!(
            parse_header("X-API-Key: abc").unwrap(),
            ("X-API-Key".to_owned(), "abc".to_owned())
        );
        assert_eq!(
            parse_header("X-Trace=1").unwrap(),
            ("X-Trace".to_owned(), "1".to_owned())
        );
        assert!(parse_header("novalue").is_err());
        assert!(parse_header(": v").is_err());
    }

    #[test]
    fn params_need_a_key() {
        assert_eq!(
            parse_param("limit=5").unwrap(),
            ("limit".to_owned(), "5".to_owned())
        );
        assert!(parse_param("=5").is_err());
        assert!(parse_param("limit").is_err());
    }

    #[test]
    fn list_params_from_flags() {
        let filter = DeviceFilterArgs {
            device: Some("d1".into()),
            params: vec!["since=2024-01-01".into()],
        };
        let params = list_params(&filter).unwrap();
        assert_eq!(
            params.to_pairs(),
            vec![
                ("device_id".to_owned(), "d1".to_owned()),
                ("since".to_owned(), "2024-01-01".to_owned()),
            ]
        );
    }

    #[test]
    fn payload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, r#"{"value": 20.5}"#).unwrap();

        let args = PayloadArgs {
            data: None,
            from_file: Some(path),
        };
        assert_eq!(
            read_payload(&args).unwrap(),
            Some(serde_json::json!({"value": 20.5}))
        );

        let empty = PayloadArgs {
            data: None,
            from_file: None,
        };
        assert!(read_payload(&empty).unwrap().is_none());
        assert!(require_payload(&empty).is_err());
    }
}
