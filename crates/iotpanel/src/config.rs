//! CLI configuration: a thin wrapper around `iotpanel_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--base-url, --api-key, --timeout, ...).

use std::time::Duration;

use secrecy::SecretString;

use iotpanel_api::ClientConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use iotpanel_config::{
    Config, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Output format: flag/env > config default > JSON.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if let Some(format) = global.output {
        return format;
    }
    match config.defaults.output.as_str() {
        "table" => OutputFormat::Table,
        "json-compact" => OutputFormat::JsonCompact,
        "yaml" => OutputFormat::Yaml,
        "plain" => OutputFormat::Plain,
        _ => OutputFormat::Json,
    }
}

/// Build the `ClientConfig` for this invocation.
///
/// Starts from the active profile (if any) and applies CLI flag overrides,
/// which take priority over profile values.
pub fn resolve_client_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, config);

    let mut client = match config.profiles.get(&profile_name) {
        Some(profile) => {
            iotpanel_config::profile_to_client_config(profile, &profile_name, &config.defaults)?
        }
        // An explicitly requested profile must exist.
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(config),
            });
        }
        None => ClientConfig::default()
            .with_timeout(Duration::from_secs(config.defaults.timeout))
            .with_log_failures(config.defaults.log_failures),
    };

    // 1. Base URL (flag > env > profile)
    if let Some(ref url) = global.base_url {
        iotpanel_config::validate_base_url(url)?;
        client.base_url.clone_from(url);
    }

    // 2. API key (flag > env > profile chain)
    if let Some(ref key) = global.api_key {
        client = client.with_api_key(SecretString::from(key.clone()));
    }

    // 3. Timeout
    if let Some(secs) = global.timeout {
        client = client.with_timeout(Duration::from_secs(secs));
    }

    // 4. --log-failures only adds logging; it never turns off a profile or default setting.
    if global.log_failures {
        client = client.with_log_failures(true);
    }

    Ok(client)
}

fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config
            .profiles
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}
