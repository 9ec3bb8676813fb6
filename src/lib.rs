//! Repolens - browse a GitHub repository from the terminal
//!
//! Repolens is a read-only client for a single repository's metadata,
//! branches, directory trees and commit history over the GitHub REST API,
//! plus a small CLI that renders the results.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, renders results)
//! - [`config`] - Injected configuration (token, API base, primary branch)
//! - [`host`] - The data layer: `RepoHost` trait, GitHub implementation,
//!   ordering policy, mock host
//! - [`ui`] - Output utilities
//!
//! # Failure Policy
//!
//! Host operations return `Result<T, FetchError>` and never throw across
//! the seam. The display boundary degrades: a failed overview section
//! renders empty with a warning instead of taking down the page, and the
//! commit paginator fails fast so a partial history is never presented as
//! complete.

pub mod cli;
pub mod config;
pub mod host;
pub mod ui;
