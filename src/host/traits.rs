//! host::traits
//!
//! The `RepoHost` trait and the value types it traffics in.
//!
//! # Design
//!
//! `RepoHost` is the seam between the data layer and whatever renders it.
//! Every method is async (network I/O) and returns `Result<T, FetchError>`;
//! nothing is thrown across the boundary. Callers decide how to degrade —
//! typically to an empty rendering with a warning — so a single failed
//! sub-fetch never takes down a whole page.
//!
//! All returned values are plain request-scoped data. Nothing here caches or
//! persists; callers hold results only as long as they need them for display.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Default page size for commit history pagination.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default display length for latest-commit messages in listings.
pub const DEFAULT_MESSAGE_LIMIT: usize = 70;

/// Placeholder shown when no commit touches an entry's path.
pub const NO_COMMIT_MESSAGE: &str = "No commit message";

/// Fallback primary branch name when none is configured.
pub const DEFAULT_PRIMARY_BRANCH: &str = "master";

/// Errors from host operations.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Network or connection error (DNS, refused connection, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The API returned a non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Error message from the API body, when parseable
        message: String,
    },

    /// The response body could not be decoded (JSON, base64, UTF-8).
    #[error("decode error: {0}")]
    Decode(String),
}

/// A repository identified by its `owner/name` full name.
///
/// Validated at construction: exactly one `/` with non-empty halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    full_name: String,
}

impl RepoRef {
    /// Parse an `owner/name` string into a `RepoRef`.
    ///
    /// Returns `None` for anything that is not exactly two non-empty
    /// segments separated by a single slash.
    pub fn parse(full_name: &str) -> Option<Self> {
        let mut parts = full_name.splitn(2, '/');
        let owner = parts.next()?;
        let name = parts.next()?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            full_name: full_name.to_string(),
        })
    }

    /// The `owner/name` string.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The owner half.
    pub fn owner(&self) -> &str {
        self.full_name.split('/').next().unwrap_or("")
    }

    /// The repository-name half.
    pub fn name(&self) -> &str {
        self.full_name.split('/').nth(1).unwrap_or("")
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_name)
    }
}

impl std::str::FromStr for RepoRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("expected owner/name, got '{}'", s))
    }
}

/// A single commit in a repository's history.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    /// Commit SHA
    pub sha: String,
    /// Full commit message
    pub message: String,
    /// Author metadata, when upstream provides it
    pub author: Option<CommitAuthor>,
}

/// Commit author metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitAuthor {
    /// Author name
    pub name: String,
    /// Author email
    pub email: Option<String>,
    /// Author date
    pub date: Option<DateTime<Utc>>,
}

/// Kind of a directory child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A subdirectory (upstream "tree" / "dir")
    Dir,
    /// A file (upstream "blob" / "file")
    File,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Dir => write!(f, "tree"),
            EntryKind::File => write!(f, "file"),
        }
    }
}

/// One immediate child of a directory.
///
/// Upstream does not guarantee ordering; impose it with
/// [`crate::host::ordering::order_entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Entry name (final path component)
    pub name: String,
    /// File or directory
    pub kind: EntryKind,
}

/// One branch of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSummary {
    /// Branch name
    pub name: String,
    /// SHA of the branch head commit
    pub sha: String,
}

/// A directory entry joined with the most recent commit touching its path.
///
/// Synthesized per request; it has no upstream counterpart. The message is
/// already truncated for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedEntry {
    /// Entry name
    pub name: String,
    /// File or directory
    pub kind: EntryKind,
    /// Truncated message of the latest commit, or the placeholder
    pub latest_message: String,
    /// SHA of the latest commit, `None` when no commit was found
    pub latest_sha: Option<String>,
}

/// A published release.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    /// Release tag name
    pub tag: String,
    /// Release display name
    pub name: Option<String>,
    /// Publication date
    pub published_at: Option<DateTime<Utc>>,
}

/// Release count plus the newest release.
///
/// Invariant: `release_count == 0` implies `latest == None`. Fetch failures
/// surface as `Err(FetchError)`, never as an in-band sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSummary {
    /// Total number of releases
    pub release_count: usize,
    /// Newest release, when any exist
    pub latest: Option<Release>,
}

/// One contributor to a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor {
    /// Login name
    pub login: String,
    /// Number of contributions
    pub contributions: u64,
}

/// One language's share of a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSlice {
    /// Language name
    pub language: String,
    /// Share of total bytes, in [0, 100]; the set sums to 100
    pub percentage: f64,
    /// Display color, `#rrggbb`
    pub color: String,
}

/// One tag of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSummary {
    /// Tag name
    pub name: String,
    /// SHA of the tagged commit
    pub sha: String,
}

/// Truncate a message to at most `max` characters by hard prefix cut.
///
/// No ellipsis, no word-boundary awareness. The cut counts characters, not
/// bytes, so multi-byte text never splits mid-character.
pub fn truncate_message(message: &str, max: usize) -> String {
    match message.char_indices().nth(max) {
        Some((idx, _)) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

/// Read-only view of a hosted repository.
///
/// Implemented by [`GitHubHost`] for the real API and [`MockHost`] for
/// deterministic tests.
///
/// # Errors
///
/// Every method returns `Result<T, FetchError>`. Callers should degrade to
/// an empty rendering at the display boundary rather than aborting a page.
///
/// [`GitHubHost`]: crate::host::github::GitHubHost
/// [`MockHost`]: crate::host::mock::MockHost
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Host name (e.g. "github").
    fn name(&self) -> &'static str;

    /// Collect the complete commit history of `branch`.
    ///
    /// Pages through the history `page_size` commits at a time until an
    /// empty page is observed. Fails fast on any page error — a partial
    /// history is never returned, so it cannot be mistaken for a complete
    /// one. Full traversal can be slow and expensive for large histories.
    async fn collect_all_commits(
        &self,
        branch: &str,
        page_size: u32,
    ) -> Result<Vec<Commit>, FetchError>;

    /// List the immediate children of the tree at `tree_ref`.
    async fn list_directory(&self, tree_ref: &str) -> Result<Vec<TreeEntry>, FetchError>;

    /// List the directory at the root of `branch`, each entry enriched with
    /// the most recent commit touching its path at `branch_sha`.
    ///
    /// Produces exactly one entry per directory child. Entries whose commit
    /// probe fails or comes back empty carry [`NO_COMMIT_MESSAGE`] and no
    /// SHA. Messages are truncated to `message_limit` characters.
    async fn list_with_latest_commits(
        &self,
        branch: &str,
        branch_sha: &str,
        message_limit: usize,
    ) -> Result<Vec<EnrichedEntry>, FetchError>;

    /// Release count and the newest release.
    async fn latest_release(&self) -> Result<ReleaseSummary, FetchError>;

    /// Contributors, in upstream order.
    async fn contributors(&self) -> Result<Vec<Contributor>, FetchError>;

    /// Language shares, ordered by byte count descending then name.
    async fn language_breakdown(&self) -> Result<Vec<LanguageSlice>, FetchError>;

    /// The decoded default README content.
    async fn readme(&self) -> Result<String, FetchError>;

    /// Tags, in upstream order.
    async fn tags(&self) -> Result<Vec<TagSummary>, FetchError>;

    /// Branch summaries, in upstream order.
    ///
    /// Order with [`crate::host::ordering::order_branches`] before display.
    async fn branches(&self) -> Result<Vec<BranchSummary>, FetchError>;
}
