use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    let posts = ctx.api.list_posts().await?;
    output(&posts, flags.format)
}
