//! host
//!
//! The repository data layer: everything that talks to (or stands in for)
//! the upstream hosting API.
//!
//! # Architecture
//!
//! The [`RepoHost`] trait is the seam consumers program against. Commands
//! hold a `GitHubHost` (or a `MockHost` in tests) and call its operations
//! independently, combining the plain value results for display. Host
//! operations never call each other; the only shared contract is that the
//! enriched listing consumes the same `name + kind` shape the tree resolver
//! produces.
//!
//! # Modules
//!
//! - `traits`: `RepoHost` trait, value types, `FetchError`
//! - [`github`]: GitHub implementation over the REST API
//! - [`ordering`]: deterministic branch and entry ordering
//! - [`palette`]: language display colors
//! - [`mock`]: in-memory implementation for deterministic testing

pub mod github;
pub mod mock;
pub mod ordering;
pub mod palette;
mod traits;

pub use ordering::{order_branches, order_entries, DirectoryEntry};
pub use traits::*;
