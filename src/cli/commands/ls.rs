//! ls command - branch root directory with latest-commit messages

use anyhow::{Context as _, Result};

use super::shared::build_host;
use crate::cli::Context;
use crate::host::{order_entries, RepoHost};
use crate::ui::output::{self, Verbosity};

/// List the root directory of `branch` with each entry's latest commit
/// message, directories first.
pub fn ls(
    ctx: &Context,
    repo: &str,
    branch: &str,
    branch_sha: &str,
    message_limit: usize,
) -> Result<()> {
    let host = build_host(ctx, repo)?;
    let verbosity = Verbosity::from_flags(ctx.quiet, false);

    let rt = tokio::runtime::Runtime::new()?;
    let entries = rt
        .block_on(host.list_with_latest_commits(branch, branch_sha, message_limit))
        .with_context(|| format!("Failed to list '{}' on branch '{}'", repo, branch))?;

    for entry in order_entries(entries) {
        output::print(
            format!("{}  {:<28} {}", entry.kind, entry.name, entry.latest_message),
            verbosity,
        );
    }

    Ok(())
}
