//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each handler resolves its arguments into a [`GitHubHost`], runs the async
//! fetch inside a per-command tokio runtime, and renders the plain value
//! results. Handlers never expose a `FetchError` as a panic; failures
//! surface as command errors, except in `overview` where each section
//! degrades independently.
//!
//! [`GitHubHost`]: crate::host::github::GitHubHost

mod auth;
mod completion;
mod log_cmd;
mod ls;
mod overview;
mod readme_cmd;
mod shared;
mod tree_cmd;

pub use auth::auth;
pub use completion::completion;
pub use log_cmd::log;
pub use ls::ls;
pub use overview::overview;
pub use readme_cmd::readme;
pub use tree_cmd::tree;

use anyhow::Result;

use super::args::Command;
use super::Context;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Overview { repo } => overview(ctx, &repo),
        Command::Log {
            repo,
            branch,
            page_size,
        } => log(ctx, &repo, &branch, page_size),
        Command::Tree { repo, tree_ref } => tree(ctx, &repo, &tree_ref),
        Command::Ls {
            repo,
            branch,
            sha,
            message_limit,
        } => ls(ctx, &repo, &branch, &sha, message_limit),
        Command::Readme { repo } => readme(ctx, &repo),
        Command::Auth { set_token, logout } => auth(ctx, set_token.as_deref(), logout),
        Command::Completion { shell } => completion(shell),
    }
}
