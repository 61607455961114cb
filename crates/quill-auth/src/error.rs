use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no refresh token stored — run `qil auth login`")]
    MissingRefreshToken,

    #[error("auth request failed: HTTP {0}")]
    BadStatus(u16),

    #[error("auth request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("token decode failed: {0}")]
    TokenDecode(String),

    #[error("token store error: {0}")]
    TokenStore(String),
}
