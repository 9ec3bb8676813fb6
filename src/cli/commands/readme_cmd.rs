//! readme command - print the repository README

use anyhow::{Context as _, Result};

use super::shared::build_host;
use crate::cli::Context;
use crate::host::RepoHost;

/// Print the decoded default README to stdout.
pub fn readme(ctx: &Context, repo: &str) -> Result<()> {
    let host = build_host(ctx, repo)?;

    let rt = tokio::runtime::Runtime::new()?;
    let content = rt
        .block_on(host.readme())
        .with_context(|| format!("Failed to fetch README for '{}'", repo))?;

    // README content goes to stdout verbatim, even under --quiet.
    print!("{}", content);
    Ok(())
}
