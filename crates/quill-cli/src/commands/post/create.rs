use quill_core::entities::CreatePost;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::post::PostCreateArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    args: &PostCreateArgs,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    let post = ctx
        .api
        .create_post(&CreatePost {
            title: args.title.clone(),
            content: args.content.clone(),
        })
        .await?;
    output(&post, flags.format)
}
