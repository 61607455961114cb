use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

pub async fn handle(flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    ctx.session.logout().await?;
    output(&AuthLogoutResponse { cleared: true }, flags.format)
}
