pub(crate) mod login;
mod logout;
mod refresh;
mod register;
mod social;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `qil auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, flags, ctx).await,
        AuthCommands::Register(args) => register::handle(args, flags, ctx).await,
        AuthCommands::Social(args) => social::handle(args, flags, ctx),
        AuthCommands::Refresh => refresh::handle(flags, ctx).await,
        AuthCommands::Logout => logout::handle(flags, ctx).await,
        AuthCommands::Status => status::handle(flags, ctx),
    }
}
