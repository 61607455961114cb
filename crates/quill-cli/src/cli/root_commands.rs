use clap::Subcommand;

use super::subcommands::{AuthCommands, PostCommands};

/// Top-level commands for the `qil` binary.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Session and credential management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Tenant-scoped posts resource.
    Post {
        #[command(subcommand)]
        action: PostCommands,
    },
}
