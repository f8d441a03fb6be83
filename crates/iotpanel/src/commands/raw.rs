//! Generic request handler for backend routes without a typed command.

use crate::cli::{RawArgs, RawMethod};
use crate::error::CliError;

use super::{Context, util};

pub async fn handle(args: RawArgs, ctx: &Context) -> Result<(), CliError> {
    let mut overrides = ctx.overrides();
    overrides.query = util::query_pairs(&args.params)?;
    let body = util::read_payload(&args.payload)?;

    let resp = match args.method {
        RawMethod::Get => ctx.client.get(&args.path, overrides).await?,
        RawMethod::Post => ctx.client.post(&args.path, &body, overrides).await?,
        RawMethod::Put => ctx.client.put(&args.path, &body, overrides).await?,
        RawMethod::Delete => ctx.client.delete(&args.path, overrides).await?,
    };
    ctx.print(&resp)
}
