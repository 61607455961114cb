mod create;
mod delete;
mod get;
mod list;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PostCommands;
use crate::context::AppContext;

/// Handle `qil post <subcommand>`.
pub async fn handle(
    action: &PostCommands,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    match action {
        PostCommands::List => list::handle(flags, ctx).await,
        PostCommands::Get(args) => get::handle(args, flags, ctx).await,
        PostCommands::Create(args) => create::handle(args, flags, ctx).await,
        PostCommands::Update(args) => update::handle(args, flags, ctx).await,
        PostCommands::Delete(args) => delete::handle(args, flags, ctx).await,
    }
}
