//! Device command handlers.

use iotpanel_api::DeviceId;

use crate::cli::{DevicesArgs, DevicesCommand};
use crate::error::CliError;

use super::{Context, util};

pub async fn handle(args: DevicesArgs, ctx: &Context) -> Result<(), CliError> {
    let resp = match args.command {
        DevicesCommand::List { params } => {
            let mut overrides = ctx.overrides();
            overrides.query = util::query_pairs(&params)?;
            ctx.client.get_devices(overrides).await?
        }
        DevicesCommand::Get { id } => {
            ctx.client
                .get_device_by_id(&DeviceId::from(id), ctx.overrides())
                .await?
        }
        DevicesCommand::Update { id, payload } => {
            let body = util::require_payload(&payload)?;
            ctx.client
                .update_device(&DeviceId::from(id), &body, ctx.overrides())
                .await?
        }
        DevicesCommand::Action {
            id,
            action,
            payload,
        } => {
            let body = util::read_payload(&payload)?;
            ctx.client
                .trigger_action(&DeviceId::from(id), &action, &body, ctx.overrides())
                .await?
        }
    };
    ctx.print(&resp)
}
