use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthRefreshResponse {
    refreshed: bool,
    expires_at: Option<String>,
}

pub async fn handle(flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    ctx.session.refresh().await?;

    let expires_at = ctx
        .session
        .access_token()
        .and_then(|token| quill_auth::claims::decode(&token).ok())
        .and_then(|claims| claims.expires_at())
        .map(|dt| dt.to_rfc3339());

    output(
        &AuthRefreshResponse {
            refreshed: true,
            expires_at,
        },
        flags.format,
    )
}
