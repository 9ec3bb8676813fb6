//! tree command - entries of a tree reference

use anyhow::{Context as _, Result};

use super::shared::build_host;
use crate::cli::Context;
use crate::host::{order_entries, RepoHost};
use crate::ui::output::{self, Verbosity};

/// List the immediate entries of the tree at `tree_ref`, directories first.
pub fn tree(ctx: &Context, repo: &str, tree_ref: &str) -> Result<()> {
    let host = build_host(ctx, repo)?;
    let verbosity = Verbosity::from_flags(ctx.quiet, false);

    let rt = tokio::runtime::Runtime::new()?;
    let entries = rt
        .block_on(host.list_directory(tree_ref))
        .with_context(|| format!("Failed to list tree '{}'", tree_ref))?;

    for entry in order_entries(entries) {
        output::print(format!("{}  {}", entry.kind, entry.name), verbosity);
    }

    Ok(())
}
