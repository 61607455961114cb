use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use quill_core::identity::{AuthProvider, DomainRef, UserProfile};

use crate::error::AuthError;

/// Identity claims carried in the access token's payload segment.
///
/// Decoded, never validated — the client does not verify signatures. Produced
/// by [`decode`], consumed by the session manager and the API client's tenant
/// header derivation.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessClaims {
    /// Numeric user id (`userid` claim; social tokens may carry `sub` or `id`).
    #[serde(rename = "userid", alias = "sub", alias = "id")]
    pub user_id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    /// Tenants the user is authorized for, in server order.
    #[serde(default)]
    pub domains: Vec<DomainRef>,
    /// Expiry as a unix timestamp. Zero when the claim is absent.
    #[serde(default)]
    pub exp: i64,
}

impl AccessClaims {
    /// UUID of the first authorized tenant. `None` when the user has no
    /// domains; never fabricated.
    #[must_use]
    pub fn tenant(&self) -> Option<&str> {
        self.domains.first().map(|d| d.uuid.as_str())
    }

    /// Expiry instant, if the token carried an `exp` claim.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.exp == 0 {
            return None;
        }
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if the token is expired or expires within `buffer_secs`.
    ///
    /// A token without an `exp` claim is treated as near-expiry.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let Some(expires_at) = self.expires_at() else {
            return true;
        };
        expires_at <= Utc::now() + chrono::TimeDelta::seconds(buffer_secs)
    }

    /// Project the claims into the consumer-facing profile.
    #[must_use]
    pub fn to_profile(&self, provider: AuthProvider) -> UserProfile {
        UserProfile {
            id: self.user_id,
            email: self.email.clone(),
            name: self.username.clone(),
            provider,
            verified: true,
            domains: self.domains.clone(),
        }
    }
}

/// Decode the payload segment of an access token.
///
/// The single decode path for the whole client: three dot-separated segments,
/// base64url (no padding) middle segment, JSON body.
///
/// # Errors
///
/// Returns `AuthError::TokenDecode` if the segment count, base64, or JSON is
/// malformed. Never panics on hostile input.
pub fn decode(token: &str) -> Result<AccessClaims, AuthError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::TokenDecode(format!(
            "expected 3 token segments, got {}",
            parts.len()
        )));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::TokenDecode(format!("base64 decode failed: {e}")))?;
    serde_json::from_slice(&payload)
        .map_err(|e| AuthError::TokenDecode(format!("JSON parse failed: {e}")))
}

/// Decode a token into a profile, degrading to the placeholder identity.
///
/// Used on the federated-callback path where a malformed token of any shape
/// must not fail the call.
#[must_use]
pub fn decode_lossy(token: &str) -> UserProfile {
    match decode(token) {
        Ok(claims) => claims.to_profile(AuthProvider::Social),
        Err(error) => {
            tracing::warn!(%error, "access token decode failed; using placeholder identity");
            UserProfile::unknown()
        }
    }
}
