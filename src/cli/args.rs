//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! Available on all commands:
//! - `--token <TOKEN>`: credential (overrides `GITHUB_TOKEN` and config)
//! - `--api-base <URL>`: API base URL (GitHub Enterprise, tests)
//! - `--quiet` / `-q`: minimal output

use clap::{Parser, Subcommand};

use crate::host::{DEFAULT_MESSAGE_LIMIT, DEFAULT_PAGE_SIZE, DEFAULT_PRIMARY_BRANCH};

/// Repolens - browse a GitHub repository's contents and history
#[derive(Parser, Debug)]
#[command(name = "rl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Personal access token (overrides GITHUB_TOKEN and the config file)
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// API base URL (for GitHub Enterprise installations)
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a repository overview page
    #[command(
        name = "overview",
        long_about = "Show a repository overview: releases, contributors, language \
            breakdown, tags and branches.\n\n\
            Each section is fetched independently. A section whose fetch fails is \
            rendered empty with a warning on stderr; the rest of the page still \
            displays."
    )]
    Overview {
        /// Repository as owner/name
        repo: String,
    },

    /// List the complete commit history of a branch
    #[command(
        name = "log",
        long_about = "Page through the full commit history of a branch.\n\n\
            Pagination continues until the upstream history is exhausted, which can \
            be slow and API-expensive for large repositories."
    )]
    Log {
        /// Repository as owner/name
        repo: String,

        /// Branch to walk
        #[arg(long, default_value = DEFAULT_PRIMARY_BRANCH)]
        branch: String,

        /// Commits per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_name = "N")]
        page_size: u32,
    },

    /// List the entries of a tree
    Tree {
        /// Repository as owner/name
        repo: String,

        /// Tree reference (commit or tree SHA)
        #[arg(long = "ref", value_name = "SHA")]
        tree_ref: String,
    },

    /// List a branch's root directory with latest-commit messages
    Ls {
        /// Repository as owner/name
        repo: String,

        /// Branch to list
        #[arg(long, default_value = DEFAULT_PRIMARY_BRANCH)]
        branch: String,

        /// Branch head SHA used to scope the per-path commit lookups
        #[arg(long, value_name = "SHA")]
        sha: String,

        /// Maximum displayed commit-message length, in characters
        #[arg(long, default_value_t = DEFAULT_MESSAGE_LIMIT, value_name = "N")]
        message_limit: usize,
    },

    /// Print the repository README
    Readme {
        /// Repository as owner/name
        repo: String,
    },

    /// Store a personal access token in the config file
    Auth {
        /// Token to store; prompts interactively when omitted
        #[arg(long, value_name = "TOKEN")]
        set_token: Option<String>,

        /// Remove the stored token
        #[arg(long)]
        logout: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn log_defaults() {
        let cli = Cli::try_parse_from(["rl", "log", "octocat/hello-world"]).unwrap();
        match cli.command {
            Command::Log {
                repo,
                branch,
                page_size,
            } => {
                assert_eq!(repo, "octocat/hello-world");
                assert_eq!(branch, "master");
                assert_eq!(page_size, 100);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn ls_message_limit_default() {
        let cli =
            Cli::try_parse_from(["rl", "ls", "o/r", "--sha", "abc"]).unwrap();
        match cli.command {
            Command::Ls { message_limit, .. } => assert_eq!(message_limit, 70),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_token_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["rl", "readme", "o/r", "--token", "t"]).unwrap();
        assert_eq!(cli.token.as_deref(), Some("t"));
    }
}
