//! Output formatting: table, JSON, YAML, plain.
//!
//! Backend payloads are opaque JSON, so tables are built dynamically from
//! object keys rather than from `Tabled` derives.

use std::io::{self, Write};
use std::path::Path;

use tabled::builder::Builder;
use tabled::settings::Style;

use serde_json::Value;

use crate::cli::OutputFormat;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a JSON payload in the chosen format.
///
/// - `table`: arrays of objects become one row per element, one column per
///   key; a single object becomes a key/value table
/// - `json` / `json-compact` / `yaml`: serialized via serde
/// - `plain`: one line per element, preferring an `id` field
pub fn render_value(format: OutputFormat, data: &Value) -> String {
    match format {
        OutputFormat::Table => render_table(data),
        OutputFormat::Json => render_json_pretty(data),
        OutputFormat::JsonCompact => render_json_compact(data),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => render_plain(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Write binary data to `out`, or raw to stdout.
pub fn write_binary(data: &[u8], out: Option<&Path>) -> io::Result<()> {
    match out {
        Some(path) => std::fs::write(path, data),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()
        }
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".into(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_table(data: &Value) -> String {
    match data {
        Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
            let mut columns: Vec<&str> = Vec::new();
            for item in items {
                if let Some(obj) = item.as_object() {
                    for key in obj.keys() {
                        if !columns.contains(&key.as_str()) {
                            columns.push(key);
                        }
                    }
                }
            }

            let mut builder = Builder::default();
            builder.push_record(columns.iter().copied());
            for item in items {
                builder.push_record(
                    columns
                        .iter()
                        .map(|col| item.get(*col).map_or_else(String::new, cell)),
                );
            }
            builder.build().with(Style::rounded()).to_string()
        }
        Value::Object(obj) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, value) in obj {
                builder.push_record([key.clone(), cell(value)]);
            }
            builder.build().with(Style::rounded()).to_string()
        }
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join("\n"),
        scalar => cell(scalar),
    }
}

fn plain_line(value: &Value) -> String {
    match value.get("id") {
        Some(id) => cell(id),
        None if value.is_object() => render_json_compact(value),
        None => cell(value),
    }
}

fn render_plain(data: &Value) -> String {
    match data {
        Value::Array(items) => items.iter().map(plain_line).collect::<Vec<_>>().join("\n"),
        Value::Null => String::new(),
        other => plain_line(other),
    }
}

/// Pretty-printed JSON.
pub(crate) fn render_json_pretty(data: &Value) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
}

/// Compact single-line JSON.
pub(crate) fn render_json_compact(data: &Value) -> String {
    data.to_string()
}

/// YAML output.
pub(crate) fn render_yaml(data: &Value) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("# failed to render YAML: {e}"))
}
