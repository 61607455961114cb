use clap::{Args, Subcommand};

/// Posts resource commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PostCommands {
    /// List posts in the current tenant.
    List,
    /// Show one post.
    Get(PostGetArgs),
    /// Create a post.
    Create(PostCreateArgs),
    /// Replace a post's title and content.
    Update(PostUpdateArgs),
    /// Delete a post.
    Delete(PostDeleteArgs),
}

#[derive(Clone, Debug, Args)]
pub struct PostGetArgs {
    pub uuid: String,
}

#[derive(Clone, Debug, Args)]
pub struct PostCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
}

#[derive(Clone, Debug, Args)]
pub struct PostUpdateArgs {
    pub uuid: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
}

#[derive(Clone, Debug, Args)]
pub struct PostDeleteArgs {
    pub uuid: String,
}
