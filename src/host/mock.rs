//! host::mock
//!
//! In-memory [`RepoHost`] for deterministic testing.
//!
//! # Design
//!
//! Holds canned repository data and answers every trait method from it.
//! Tests can point any single operation at a failure to exercise the
//! degrade paths of consumers. The enrichment contract (placeholder
//! message, truncation, one output per entry) matches the real host.
//!
//! # Example
//!
//! ```ignore
//! use repolens::host::mock::MockHost;
//! use repolens::host::RepoHost;
//!
//! let host = MockHost::new();
//! let releases = host.latest_release().await.unwrap();
//! assert_eq!(releases.release_count, 0);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{
    truncate_message, BranchSummary, Commit, Contributor, EnrichedEntry, FetchError,
    LanguageSlice, Release, ReleaseSummary, RepoHost, TagSummary, TreeEntry, NO_COMMIT_MESSAGE,
};

/// Which operation should fail, and with what error.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail collect_all_commits.
    Commits(FetchError),
    /// Fail list_directory.
    Directory(FetchError),
    /// Fail list_with_latest_commits.
    Listing(FetchError),
    /// Fail latest_release.
    Release(FetchError),
    /// Fail contributors.
    Contributors(FetchError),
    /// Fail language_breakdown.
    Languages(FetchError),
    /// Fail readme.
    Readme(FetchError),
    /// Fail tags.
    Tags(FetchError),
    /// Fail branches.
    Branches(FetchError),
}

/// Canned repository data served by [`MockHost`].
#[derive(Debug, Clone, Default)]
pub struct MockRepoData {
    /// Full commit history, newest first
    pub commits: Vec<Commit>,
    /// Directory entries at the root
    pub entries: Vec<TreeEntry>,
    /// Latest commit per entry path
    pub latest_by_path: HashMap<String, Commit>,
    /// Releases, newest first
    pub releases: Vec<Release>,
    /// Contributors
    pub contributors: Vec<Contributor>,
    /// Language slices, already ordered
    pub languages: Vec<LanguageSlice>,
    /// Decoded README, when present
    pub readme: Option<String>,
    /// Tags
    pub tags: Vec<TagSummary>,
    /// Branches
    pub branches: Vec<BranchSummary>,
}

/// Mock host for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockHost {
    inner: Arc<Mutex<MockHostInner>>,
}

#[derive(Debug)]
struct MockHostInner {
    data: MockRepoData,
    fail_on: Option<FailOn>,
    /// Branch names passed to collect_all_commits, for verification
    commit_requests: Vec<String>,
}

impl MockHost {
    /// Create an empty mock host.
    pub fn new() -> Self {
        Self::with_data(MockRepoData::default())
    }

    /// Create a mock host serving `data`.
    pub fn with_data(data: MockRepoData) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockHostInner {
                data,
                fail_on: None,
                commit_requests: Vec::new(),
            })),
        }
    }

    /// Configure one operation to fail.
    pub fn set_fail_on(&self, fail_on: FailOn) {
        self.inner.lock().unwrap().fail_on = Some(fail_on);
    }

    /// Branch names that collect_all_commits has been asked about.
    pub fn commit_requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().commit_requests.clone()
    }

    fn fail_for(&self, pick: impl Fn(&FailOn) -> Option<&FetchError>) -> Result<(), FetchError> {
        let inner = self.inner.lock().unwrap();
        match inner.fail_on.as_ref().and_then(pick) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepoHost for MockHost {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn collect_all_commits(
        &self,
        branch: &str,
        _page_size: u32,
    ) -> Result<Vec<Commit>, FetchError> {
        self.fail_for(|f| match f {
            FailOn::Commits(e) => Some(e),
            _ => None,
        })?;
        let mut inner = self.inner.lock().unwrap();
        inner.commit_requests.push(branch.to_string());
        Ok(inner.data.commits.clone())
    }

    async fn list_directory(&self, _tree_ref: &str) -> Result<Vec<TreeEntry>, FetchError> {
        self.fail_for(|f| match f {
            FailOn::Directory(e) => Some(e),
            _ => None,
        })?;
        Ok(self.inner.lock().unwrap().data.entries.clone())
    }

    async fn list_with_latest_commits(
        &self,
        _branch: &str,
        _branch_sha: &str,
        message_limit: usize,
    ) -> Result<Vec<EnrichedEntry>, FetchError> {
        self.fail_for(|f| match f {
            FailOn::Listing(e) => Some(e),
            _ => None,
        })?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .data
            .entries
            .iter()
            .map(|entry| {
                let latest = inner.data.latest_by_path.get(&entry.name);
                EnrichedEntry {
                    name: entry.name.clone(),
                    kind: entry.kind,
                    latest_message: match latest {
                        Some(c) => truncate_message(&c.message, message_limit),
                        None => NO_COMMIT_MESSAGE.to_string(),
                    },
                    latest_sha: latest.map(|c| c.sha.clone()),
                }
            })
            .collect())
    }

    async fn latest_release(&self) -> Result<ReleaseSummary, FetchError> {
        self.fail_for(|f| match f {
            FailOn::Release(e) => Some(e),
            _ => None,
        })?;
        let inner = self.inner.lock().unwrap();
        Ok(ReleaseSummary {
            release_count: inner.data.releases.len(),
            latest: inner.data.releases.first().cloned(),
        })
    }

    async fn contributors(&self) -> Result<Vec<Contributor>, FetchError> {
        self.fail_for(|f| match f {
            FailOn::Contributors(e) => Some(e),
            _ => None,
        })?;
        Ok(self.inner.lock().unwrap().data.contributors.clone())
    }

    async fn language_breakdown(&self) -> Result<Vec<LanguageSlice>, FetchError> {
        self.fail_for(|f| match f {
            FailOn::Languages(e) => Some(e),
            _ => None,
        })?;
        Ok(self.inner.lock().unwrap().data.languages.clone())
    }

    async fn readme(&self) -> Result<String, FetchError> {
        self.fail_for(|f| match f {
            FailOn::Readme(e) => Some(e),
            _ => None,
        })?;
        self.inner
            .lock()
            .unwrap()
            .data
            .readme
            .clone()
            .ok_or_else(|| FetchError::Http {
                status: 404,
                message: "Not Found".into(),
            })
    }

    async fn tags(&self) -> Result<Vec<TagSummary>, FetchError> {
        self.fail_for(|f| match f {
            FailOn::Tags(e) => Some(e),
            _ => None,
        })?;
        Ok(self.inner.lock().unwrap().data.tags.clone())
    }

    async fn branches(&self) -> Result<Vec<BranchSummary>, FetchError> {
        self.fail_for(|f| match f {
            FailOn::Branches(e) => Some(e),
            _ => None,
        })?;
        Ok(self.inner.lock().unwrap().data.branches.clone())
    }
}
