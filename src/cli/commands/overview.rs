//! overview command - repository overview page

use anyhow::Result;

use super::shared::build_host;
use crate::cli::Context;
use crate::host::github::GitHubHost;
use crate::host::{order_branches, FetchError, RepoHost};
use crate::ui::output::{self, Verbosity};

/// Show the repository overview: releases, languages, contributors, tags,
/// branches.
///
/// Sections are fetched independently; a failed section renders empty with
/// a warning so the rest of the page still displays.
pub fn overview(ctx: &Context, repo: &str) -> Result<()> {
    let host = build_host(ctx, repo)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(overview_async(ctx, &host, repo))
}

async fn overview_async(ctx: &Context, host: &GitHubHost, repo: &str) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, false);

    output::print(repo, verbosity);

    match host.latest_release().await {
        Ok(summary) => {
            output::print(format!("\nReleases: {}", summary.release_count), verbosity);
            if let Some(latest) = summary.latest {
                output::print(format!("  latest: {}", latest.tag), verbosity);
            }
        }
        Err(e) => section_unavailable("releases", &e),
    }

    match host.language_breakdown().await {
        Ok(languages) if !languages.is_empty() => {
            output::print("\nLanguages:", verbosity);
            for slice in languages {
                output::print(
                    format!(
                        "  {:<20} {:>5.1}%  {}",
                        slice.language, slice.percentage, slice.color
                    ),
                    verbosity,
                );
            }
        }
        Ok(_) => {}
        Err(e) => section_unavailable("languages", &e),
    }

    match host.contributors().await {
        Ok(contributors) if !contributors.is_empty() => {
            output::print("\nContributors:", verbosity);
            for c in contributors {
                output::print(format!("  {:<24} {}", c.login, c.contributions), verbosity);
            }
        }
        Ok(_) => {}
        Err(e) => section_unavailable("contributors", &e),
    }

    match host.tags().await {
        Ok(tags) if !tags.is_empty() => {
            output::print(format!("\nTags: {}", tags.len()), verbosity);
        }
        Ok(_) => {}
        Err(e) => section_unavailable("tags", &e),
    }

    match host.branches().await {
        Ok(branches) => {
            let ordered = order_branches(branches, ctx.primary_branch());
            if !ordered.is_empty() {
                output::print("\nBranches:", verbosity);
                for branch in ordered {
                    output::print(format!("  {}", branch.name), verbosity);
                }
            }
        }
        Err(e) => section_unavailable("branches", &e),
    }

    Ok(())
}

/// Degrade a failed section: warn on stderr, render nothing.
fn section_unavailable(section: &str, err: &FetchError) {
    output::error(format!("{} unavailable: {}", section, err));
}
