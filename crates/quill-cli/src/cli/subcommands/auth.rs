use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in with email and password.
    Login(AuthLoginArgs),
    /// Create an account and log in immediately.
    Register(AuthRegisterArgs),
    /// Adopt tokens handed over by a federated-login callback.
    Social(AuthSocialArgs),
    /// Mint a new token pair from the stored refresh token.
    Refresh,
    /// Notify the server and clear stored credentials.
    Logout,
    /// Show current session status.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// Display name for the new account.
    #[arg(long)]
    pub name: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthSocialArgs {
    /// Access token from the callback redirect.
    #[arg(long)]
    pub access_token: String,
    /// Refresh token from the callback redirect.
    #[arg(long)]
    pub refresh_token: String,
}
