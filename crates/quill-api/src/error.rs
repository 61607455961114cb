use thiserror::Error;

use quill_auth::AuthError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Terminal non-2xx status after retry exhaustion.
    #[error("API request failed: HTTP {0}")]
    Status(u16),

    #[error("API request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("response decode failed: {0}")]
    Decode(String),

    /// The mid-request token refresh failed; the session has been logged out.
    #[error(transparent)]
    Auth(#[from] AuthError),
}
