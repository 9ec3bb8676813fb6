//! log command - full commit history of a branch

use anyhow::{Context as _, Result};

use super::shared::build_host;
use crate::cli::Context;
use crate::host::RepoHost;
use crate::ui::output::{self, Verbosity};

/// Print the complete commit history of `branch`, newest first.
///
/// Walks every page of history, which can take a while on large
/// repositories.
pub fn log(ctx: &Context, repo: &str, branch: &str, page_size: u32) -> Result<()> {
    let host = build_host(ctx, repo)?;
    let verbosity = Verbosity::from_flags(ctx.quiet, false);

    let rt = tokio::runtime::Runtime::new()?;
    let commits = rt
        .block_on(host.collect_all_commits(branch, page_size))
        .with_context(|| format!("Failed to fetch commit history for '{}'", branch))?;

    output::print(
        format!("{} commits on {}", commits.len(), branch),
        verbosity,
    );
    for commit in commits {
        let short_sha: String = commit.sha.chars().take(7).collect();
        let first_line = commit.message.lines().next().unwrap_or("");
        match commit.author {
            Some(author) => output::print(
                format!("{}  {}  ({})", short_sha, first_line, author.name),
                verbosity,
            ),
            None => output::print(format!("{}  {}", short_sha, first_line), verbosity),
        }
    }

    Ok(())
}
