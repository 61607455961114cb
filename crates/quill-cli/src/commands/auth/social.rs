use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthSocialArgs;
use crate::commands::auth::login::summarize;
use crate::context::AppContext;
use crate::output::output;

/// Hand-off path for federated logins: the browser callback delivers the
/// token pair out of band and this adopts it. A malformed access token still
/// establishes the session, with the placeholder identity.
pub fn handle(args: &AuthSocialArgs, flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    ctx.session
        .handle_social_auth(&args.access_token, &args.refresh_token)?;
    output(&summarize(&ctx.session), flags.format)
}
