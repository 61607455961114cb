use quill_core::entities::UpdatePost;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::post::PostUpdateArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    args: &PostUpdateArgs,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    let post = ctx
        .api
        .update_post(
            &args.uuid,
            &UpdatePost {
                title: args.title.clone(),
                content: args.content.clone(),
            },
        )
        .await?;
    output(&post, flags.format)
}
