//! Helpers shared by command handlers.

use anyhow::{anyhow, Result};

use crate::cli::Context;
use crate::host::github::GitHubHost;
use crate::host::RepoRef;

/// Build a [`GitHubHost`] for `repo` from the invocation context.
pub fn build_host(ctx: &Context, repo: &str) -> Result<GitHubHost> {
    let repo = RepoRef::parse(repo)
        .ok_or_else(|| anyhow!("Invalid repository '{}': expected owner/name", repo))?;
    let token = ctx.resolve_token()?;

    Ok(match ctx.resolve_api_base() {
        Some(api_base) => GitHubHost::with_api_base(token, repo, api_base),
        None => GitHubHost::new(token, repo),
    })
}
