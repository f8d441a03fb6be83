//! Clap derive structures for the `iotpanel` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only depends on clap so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// iotpanel -- command-line client for the IoT control panel backend
#[derive(Debug, Parser)]
#[command(
    name = "iotpanel",
    version,
    about = "Talk to the IoT control panel backend from the command line",
    long_about = "Query and manage devices, temperature telemetry and screenshots\n\
        on an IoT control panel backend over its REST API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "IOTPANEL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'b', env = "IOTPANEL_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// API key sent as X-API-Key
    #[arg(long, env = "IOTPANEL_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Extra request header, as "Name: value" (repeatable)
    #[arg(long = "header", short = 'H', global = true)]
    pub headers: Vec<String>,

    /// Output format
    #[arg(long, short = 'o', env = "IOTPANEL_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, env = "IOTPANEL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Log every failed request (development mode)
    #[arg(long, env = "IOTPANEL_LOG_FAILURES", global = true)]
    pub log_failures: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table
    Table,
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check backend health
    Health,

    /// Manage devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Temperature sensor records
    #[command(alias = "temp", alias = "t")]
    Temperature(TemperatureArgs),

    /// Screenshot records
    #[command(alias = "shot", alias = "s")]
    Screenshot(ScreenshotArgs),

    /// Send a request to an arbitrary backend path
    Raw(RawArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Print a roff man page to stdout
    Manpage(ManpageArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// JSON request payload, inline or from a file.
#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// Inline JSON payload
    #[arg(long, short = 'd', conflicts_with = "from_file")]
    pub data: Option<String>,

    /// Read the JSON payload from a file
    #[arg(long, short = 'F')]
    pub from_file: Option<PathBuf>,
}

/// Optional device filter for list/latest commands.
#[derive(Debug, Args)]
pub struct DeviceFilterArgs {
    /// Only records from this device
    #[arg(long, short = 'D')]
    pub device: Option<String>,

    /// Extra query parameter, as key=value (repeatable)
    #[arg(long = "param")]
    pub params: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices
    #[command(alias = "ls")]
    List {
        /// Extra query parameter, as key=value (repeatable)
        #[arg(long = "param")]
        params: Vec<String>,
    },

    /// Get a single device
    Get {
        /// Device ID
        id: String,
    },

    /// Replace a device with a full payload
    Update {
        /// Device ID
        id: String,

        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Trigger a device action
    Action {
        /// Device ID
        id: String,

        /// Action name (e.g. "reboot", "toggle")
        action: String,

        #[command(flatten)]
        payload: PayloadArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TEMPERATURE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TemperatureArgs {
    #[command(subcommand)]
    pub command: TemperatureCommand,
}

#[derive(Debug, Subcommand)]
pub enum TemperatureCommand {
    /// List recent temperature records
    #[command(alias = "ls")]
    List(DeviceFilterArgs),

    /// Show the latest temperature record
    Latest(DeviceFilterArgs),

    /// Get a single record
    Get {
        /// Record ID
        id: String,
    },

    /// Create a temperature record
    Create(PayloadArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SCREENSHOT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ScreenshotArgs {
    #[command(subcommand)]
    pub command: ScreenshotCommand,
}

#[derive(Debug, Subcommand)]
pub enum ScreenshotCommand {
    /// List screenshot metadata
    #[command(alias = "ls")]
    List(DeviceFilterArgs),

    /// Download the latest screenshot image
    Latest {
        #[command(flatten)]
        filter: DeviceFilterArgs,

        /// Write the image here instead of stdout
        #[arg(long, short = 'O')]
        out: Option<PathBuf>,
    },

    /// Download a screenshot image by record ID
    Get {
        /// Record ID
        id: String,

        /// Write the image here instead of stdout
        #[arg(long, short = 'O')]
        out: Option<PathBuf>,
    },

    /// Upload a screenshot
    Upload {
        /// Device the screenshot belongs to
        #[arg(long, short = 'D')]
        device: Option<String>,

        /// Image format (png, jpeg, ...); guessed from the file extension if omitted
        #[arg(long)]
        format: Option<String>,

        /// Image file
        #[arg(long, short = 'i')]
        image: Option<PathBuf>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RAW
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RawArgs {
    /// HTTP method
    pub method: RawMethod,

    /// Path relative to the base URL, or an absolute URL
    pub path: String,

    /// Query parameter, as key=value (repeatable)
    #[arg(long = "param")]
    pub params: Vec<String>,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RawMethod {
    Get,
    Post,
    Put,
    Delete,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an API key in the system keyring
    SetKey {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Args)]
pub struct ManpageArgs {
    /// Subcommand to document (e.g. `screenshot`); omit for the top-level page
    pub command: Option<String>,
}
