//! Temperature record command handlers.

use iotpanel_api::RecordId;

use crate::cli::{TemperatureArgs, TemperatureCommand};
use crate::error::CliError;

use super::{Context, util};

pub async fn handle(args: TemperatureArgs, ctx: &Context) -> Result<(), CliError> {
    let resp = match args.command {
        TemperatureCommand::List(filter) => {
            let params = util::list_params(&filter)?;
            ctx.client
                .get_temperature_list(&params, ctx.overrides())
                .await?
        }
        TemperatureCommand::Latest(filter) => {
            let params = util::list_params(&filter)?;
            ctx.client
                .get_temperature_latest(&params, ctx.overrides())
                .await?
        }
        TemperatureCommand::Get { id } => {
            ctx.client
                .get_temperature_by_id(&RecordId::from(id), ctx.overrides())
                .await?
        }
        TemperatureCommand::Create(payload) => {
            let record = util::require_payload(&payload)?;
            ctx.client
                .post_temperature(&record, ctx.overrides())
                .await?
        }
    };
    ctx.print(&resp)
}
