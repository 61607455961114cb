use crate::cli::GlobalFlags;
use crate::cli::subcommands::post::PostGetArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &PostGetArgs, flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    let post = ctx.api.get_post(&args.uuid).await?;
    output(&post, flags.format)
}
