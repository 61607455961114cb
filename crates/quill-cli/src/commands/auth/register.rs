use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthRegisterArgs;
use crate::commands::auth::login::summarize;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    args: &AuthRegisterArgs,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    ctx.session
        .register(&args.email, &args.password, &args.name)
        .await?;
    output(&summarize(&ctx.session), flags.format)
}
