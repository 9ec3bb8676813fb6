//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve configuration (flag > environment > config file)
//! - Delegate to command handlers
//!
//! The CLI is the display boundary: handlers render host results as plain
//! text, and the multi-section `overview` handler degrades failed sections
//! instead of aborting the page.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{bail, Context as _, Result};

use crate::config::{GlobalConfig, TOKEN_ENV};
use crate::host::DEFAULT_PRIMARY_BRANCH;

/// Resolved invocation context shared by command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Token from the `--token` flag, when given
    pub token_flag: Option<String>,
    /// API base from the `--api-base` flag, when given
    pub api_base_flag: Option<String>,
    /// Minimal output
    pub quiet: bool,
    /// Loaded user configuration
    pub config: GlobalConfig,
}

impl Context {
    /// Resolve the credential: flag, then `GITHUB_TOKEN`, then config file.
    pub fn resolve_token(&self) -> Result<String> {
        if let Some(token) = &self.token_flag {
            return Ok(token.clone());
        }
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.is_empty() {
                return Ok(token);
            }
        }
        if let Some(token) = &self.config.token {
            return Ok(token.clone());
        }
        bail!(
            "No token configured. Pass --token, set {}, or run `rl auth`.",
            TOKEN_ENV
        );
    }

    /// Resolve the API base override, when any.
    pub fn resolve_api_base(&self) -> Option<String> {
        self.api_base_flag
            .clone()
            .or_else(|| self.config.api_base.clone())
    }

    /// The branch name pinned first when ordering branches.
    pub fn primary_branch(&self) -> &str {
        self.config
            .primary_branch
            .as_deref()
            .unwrap_or(DEFAULT_PRIMARY_BRANCH)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config = GlobalConfig::load().context("Failed to load configuration")?;

    let ctx = Context {
        token_flag: cli.token.clone(),
        api_base_flag: cli.api_base.clone(),
        quiet: cli.quiet,
        config,
    };

    commands::dispatch(cli.command, &ctx)
}
