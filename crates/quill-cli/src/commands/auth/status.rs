use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user: Option<String>,
    email: Option<String>,
    domain: Option<String>,
    expires_at: Option<String>,
    expires_soon: Option<bool>,
    token_source: Option<String>,
    note: Option<String>,
}

/// Never errors: a missing or malformed stored token degrades to an
/// informative status instead of a failure.
pub fn handle(flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    let status = match ctx.session.access_token() {
        None => AuthStatusResponse {
            authenticated: false,
            user: None,
            email: None,
            domain: None,
            expires_at: None,
            expires_soon: None,
            token_source: None,
            note: Some("no stored token — run `qil auth login`".into()),
        },
        Some(token) => match quill_auth::claims::decode(&token) {
            Ok(claims) => AuthStatusResponse {
                authenticated: true,
                user: Some(claims.username.clone()),
                email: Some(claims.email.clone()),
                domain: claims.tenant().map(String::from),
                expires_at: claims.expires_at().map(|dt| dt.to_rfc3339()),
                expires_soon: Some(claims.is_near_expiry(60)),
                token_source: ctx.session.token_source().map(String::from),
                note: None,
            },
            Err(error) => {
                let placeholder = quill_auth::claims::decode_lossy(&token);
                AuthStatusResponse {
                    authenticated: true,
                    user: Some(placeholder.name),
                    email: Some(placeholder.email),
                    domain: None,
                    expires_at: None,
                    expires_soon: None,
                    token_source: ctx.session.token_source().map(String::from),
                    note: Some(format!("stored token could not be decoded: {error}")),
                }
            }
        },
    };

    output(&status, flags.format)
}
