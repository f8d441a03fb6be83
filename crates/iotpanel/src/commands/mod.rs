//! Command handlers, one module per resource.

pub mod config_cmd;
pub mod devices;
pub mod manpage;
pub mod raw;
pub mod screenshot;
pub mod temperature;
pub mod util;

use iotpanel_api::{ApiClient, ApiResponse, Payload, RequestOverride};

use crate::cli::{Command, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Everything a backend command needs: the client plus per-invocation options.
pub struct Context {
    pub client: ApiClient,
    pub format: OutputFormat,
    pub quiet: bool,
    /// Overrides from the global `--header` flags, applied to every call.
    pub overrides: RequestOverride,
}

impl Context {
    /// Fresh copy of the global overrides for one call.
    pub fn overrides(&self) -> RequestOverride {
        self.overrides.clone()
    }

    /// Render a response body in the selected output format.
    pub fn print(&self, resp: &ApiResponse) -> Result<(), CliError> {
        match &resp.payload {
            Payload::Json(value) => {
                output::print_output(&output::render_value(self.format, value), self.quiet);
            }
            Payload::Text(text) => output::print_output(text, self.quiet),
            Payload::Binary(bytes) => {
                if !self.quiet {
                    output::write_binary(bytes, None)?;
                }
            }
        }
        Ok(())
    }
}

/// Route a backend command to its handler.
pub async fn dispatch(cmd: Command, ctx: &Context) -> Result<(), CliError> {
    match cmd {
        Command::Health => {
            let resp = ctx.client.health(ctx.overrides()).await?;
            ctx.print(&resp)
        }
        Command::Devices(args) => devices::handle(args, ctx).await,
        Command::Temperature(args) => temperature::handle(args, ctx).await,
        Command::Screenshot(args) => screenshot::handle(args, ctx).await,
        Command::Raw(args) => raw::handle(args, ctx).await,
        // Handled in main before a client is built.
        Command::Config(_) | Command::Completions(_) | Command::Manpage(_) => Ok(()),
    }
}
