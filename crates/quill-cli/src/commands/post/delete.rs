use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::post::PostDeleteArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct PostDeleteResponse {
    deleted: bool,
    uuid: String,
}

pub async fn handle(
    args: &PostDeleteArgs,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    ctx.api.delete_post(&args.uuid).await?;
    output(
        &PostDeleteResponse {
            deleted: true,
            uuid: args.uuid.clone(),
        },
        flags.format,
    )
}
