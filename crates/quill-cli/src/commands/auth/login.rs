use serde::Serialize;

use quill_auth::SessionManager;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
pub(crate) struct AuthSessionResponse {
    authenticated: bool,
    user_id: Option<i64>,
    email: Option<String>,
    name: Option<String>,
    domain: Option<String>,
    expires_at: Option<String>,
}

/// Summarize the published session for command output.
pub(crate) fn summarize(session: &SessionManager) -> AuthSessionResponse {
    let current = session.current();
    let expires_at = session
        .access_token()
        .and_then(|token| quill_auth::claims::decode(&token).ok())
        .and_then(|claims| claims.expires_at())
        .map(|dt| dt.to_rfc3339());

    let authenticated = current.is_authenticated();
    let user = current.user;
    AuthSessionResponse {
        authenticated,
        user_id: user.as_ref().map(|u| u.id),
        email: user.as_ref().map(|u| u.email.clone()),
        name: user.as_ref().map(|u| u.name.clone()),
        domain: user
            .as_ref()
            .and_then(|u| u.first_domain())
            .map(|d| d.uuid.clone()),
        expires_at,
    }
}

pub async fn handle(
    args: &AuthLoginArgs,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    ctx.session.login(&args.email, &args.password).await?;
    output(&summarize(&ctx.session), flags.format)
}
