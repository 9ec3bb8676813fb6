//! host::github
//!
//! GitHub implementation of [`RepoHost`] over the REST API.
//!
//! # Design
//!
//! One struct owns the HTTP client, the credential, and the repository
//! reference; every operation is a GET against `api_base` (configurable for
//! GitHub Enterprise and for tests against a local mock server).
//!
//! Failure policy per operation:
//! - commit pagination fails fast — a partial history must never be mistaken
//!   for a complete one;
//! - the enriched listing degrades per entry — one failed commit probe costs
//!   that entry its message, not the whole listing;
//! - metadata fetchers surface their error and let the caller degrade.
//!
//! # Rate Limiting
//!
//! GitHub rate limits surface as `FetchError::Http { status: 403 | 429, .. }`.
//! No automatic backoff is performed; that is the caller's call.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use futures::future;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::palette::color_for;
use super::traits::{
    truncate_message, BranchSummary, Commit, CommitAuthor, Contributor, EnrichedEntry, EntryKind,
    FetchError, LanguageSlice, Release, ReleaseSummary, RepoHost, RepoRef, TagSummary, TreeEntry,
    NO_COMMIT_MESSAGE,
};

/// Default GitHub API base URL.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "repolens-cli";

/// Per-request timeout. Bounds a hung commit probe so the listing join
/// always settles.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// GitHub host implementation.
///
/// # Example
///
/// ```ignore
/// use repolens::host::github::GitHubHost;
/// use repolens::host::{RepoHost, RepoRef};
///
/// let repo = RepoRef::parse("octocat/hello-world").unwrap();
/// let host = GitHubHost::new("ghp_xxx", repo);
/// let releases = host.latest_release().await?;
/// ```
pub struct GitHubHost {
    /// HTTP client for making requests
    client: Client,
    /// Bearer credential; opaque, never inspected
    token: String,
    /// Repository being browsed
    repo: RepoRef,
    /// API base URL (configurable for Enterprise and tests)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubHost")
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubHost {
    /// Create a host for `repo` authenticated with `token`.
    pub fn new(token: impl Into<String>, repo: RepoRef) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            repo,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create a host with a custom API base URL.
    ///
    /// Used for GitHub Enterprise installations and for tests pointing at a
    /// local mock server.
    pub fn with_api_base(
        token: impl Into<String>,
        repo: RepoRef,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            repo,
            api_base: api_base.into(),
        }
    }

    /// The repository this host browses.
    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("token {}", self.token))
            .map_err(|_| FetchError::Network("credential contains invalid characters".into()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Build URL for a repository endpoint.
    fn repo_url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}", self.api_base, self.repo.full_name(), path)
    }

    /// GET `url` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .headers(self.headers()?)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| FetchError::Decode(e.to_string()))
        } else {
            Err(Self::error_response(response).await)
        }
    }

    /// Map a non-success response to a `FetchError`, pulling the message
    /// from the GitHub error body when it parses.
    async fn error_response(response: Response) -> FetchError {
        let status = response.status().as_u16();
        let message = match response.json::<GitHubErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => "Unknown error".to_string(),
        };
        FetchError::Http { status, message }
    }
}

#[async_trait]
impl RepoHost for GitHubHost {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn collect_all_commits(
        &self,
        branch: &str,
        page_size: u32,
    ) -> Result<Vec<Commit>, FetchError> {
        let mut all = Vec::new();
        let mut page: u32 = 1;

        // Pages strictly sequentially: page N must come back non-empty
        // before page N+1 is requested. Terminates only on an observed
        // empty page, so the accumulator holds the complete history.
        loop {
            let url = format!(
                "{}?sha={}&page={}&per_page={}",
                self.repo_url("commits"),
                branch,
                page,
                page_size
            );

            let batch: Vec<GitHubCommit> = self.get_json(&url).await?;
            if batch.is_empty() {
                break;
            }

            all.extend(batch.into_iter().map(Commit::from));
            page += 1;
        }

        Ok(all)
    }

    async fn list_directory(&self, tree_ref: &str) -> Result<Vec<TreeEntry>, FetchError> {
        let url = self.repo_url(&format!("git/trees/{}", tree_ref));
        let response: GitHubTreeResponse = self.get_json(&url).await?;

        // Keep only name and kind; blob sha, mode and size are display noise.
        Ok(response
            .tree
            .into_iter()
            .map(|item| TreeEntry {
                name: item.path,
                kind: entry_kind(&item.kind),
            })
            .collect())
    }

    async fn list_with_latest_commits(
        &self,
        branch: &str,
        branch_sha: &str,
        message_limit: usize,
    ) -> Result<Vec<EnrichedEntry>, FetchError> {
        let url = format!("{}?ref={}", self.repo_url("contents"), branch);
        let items: Vec<GitHubContentItem> = self.get_json(&url).await?;

        // One probe per path, all in flight at once; each probe carries its
        // path so the join below is keyed, never positional. A failed or
        // empty probe yields None and the entry falls back to the
        // placeholder. Paths are repository-relative; basic ASCII names
        // don't need URL encoding.
        let probes = items.iter().map(|item| {
            let path = item.path.clone();
            let url = format!(
                "{}?path={}&sha={}&per_page=1",
                self.repo_url("commits"),
                item.path,
                branch_sha
            );
            async move {
                let latest = match self.get_json::<Vec<GitHubCommit>>(&url).await {
                    Ok(mut commits) if !commits.is_empty() => Some(commits.remove(0)),
                    _ => None,
                };
                (path, latest)
            }
        });

        let mut latest_by_path: HashMap<String, GitHubCommit> = future::join_all(probes)
            .await
            .into_iter()
            .filter_map(|(path, latest)| latest.map(|c| (path, c)))
            .collect();

        Ok(items
            .into_iter()
            .map(|item| {
                let latest = latest_by_path.remove(&item.path);
                let latest_message = match &latest {
                    Some(c) => truncate_message(&c.commit.message, message_limit),
                    None => NO_COMMIT_MESSAGE.to_string(),
                };
                EnrichedEntry {
                    name: item.name,
                    kind: entry_kind(&item.kind),
                    latest_message,
                    latest_sha: latest.map(|c| c.sha),
                }
            })
            .collect())
    }

    async fn latest_release(&self) -> Result<ReleaseSummary, FetchError> {
        let releases: Vec<GitHubRelease> = self.get_json(&self.repo_url("releases")).await?;
        Ok(ReleaseSummary {
            release_count: releases.len(),
            latest: releases.into_iter().next().map(Release::from),
        })
    }

    async fn contributors(&self) -> Result<Vec<Contributor>, FetchError> {
        let contributors: Vec<GitHubContributor> =
            self.get_json(&self.repo_url("contributors")).await?;
        Ok(contributors.into_iter().map(Into::into).collect())
    }

    async fn language_breakdown(&self) -> Result<Vec<LanguageSlice>, FetchError> {
        let bytes: HashMap<String, u64> = self.get_json(&self.repo_url("languages")).await?;

        let total: u64 = bytes.values().sum();
        if total == 0 {
            return Ok(Vec::new());
        }

        // JSON object order is not preserved through a map, so impose one:
        // largest share first, name as tie-break.
        let mut sized: Vec<(String, u64)> = bytes.into_iter().collect();
        sized.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(sized
            .into_iter()
            .enumerate()
            .map(|(index, (language, count))| {
                let color = color_for(index, &language);
                LanguageSlice {
                    percentage: (count as f64 / total as f64) * 100.0,
                    language,
                    color,
                }
            })
            .collect())
    }

    async fn readme(&self) -> Result<String, FetchError> {
        let readme: GitHubReadme = self.get_json(&self.repo_url("readme")).await?;

        // GitHub wraps base64 content at 60 columns; strip whitespace first.
        let packed: String = readme
            .content
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let decoded = STANDARD
            .decode(packed)
            .map_err(|e| FetchError::Decode(format!("README base64: {}", e)))?;
        String::from_utf8(decoded).map_err(|e| FetchError::Decode(format!("README utf-8: {}", e)))
    }

    async fn tags(&self) -> Result<Vec<TagSummary>, FetchError> {
        let tags: Vec<GitHubTag> = self.get_json(&self.repo_url("tags")).await?;
        Ok(tags
            .into_iter()
            .map(|t| TagSummary {
                name: t.name,
                sha: t.commit.sha,
            })
            .collect())
    }

    async fn branches(&self) -> Result<Vec<BranchSummary>, FetchError> {
        let branches: Vec<GitHubBranch> = self.get_json(&self.repo_url("branches")).await?;
        Ok(branches
            .into_iter()
            .map(|b| BranchSummary {
                name: b.name,
                sha: b.commit.sha,
            })
            .collect())
    }
}

/// Map an upstream type tag to an [`EntryKind`].
///
/// The git-trees endpoint says "tree"/"blob"; the contents endpoint says
/// "dir"/"file". Anything unrecognized (submodules, symlinks) is treated as
/// a file for display purposes.
fn entry_kind(upstream: &str) -> EntryKind {
    match upstream {
        "tree" | "dir" => EntryKind::Dir,
        _ => EntryKind::File,
    }
}

// --------------------------------------------------------------------------
// API Response Types
// --------------------------------------------------------------------------

/// GitHub error response format.
#[derive(Deserialize)]
struct GitHubErrorBody {
    message: String,
}

/// Commit list item.
#[derive(Deserialize)]
struct GitHubCommit {
    sha: String,
    commit: GitHubCommitDetail,
}

#[derive(Deserialize)]
struct GitHubCommitDetail {
    message: String,
    author: Option<GitHubCommitAuthor>,
}

#[derive(Deserialize)]
struct GitHubCommitAuthor {
    name: String,
    email: Option<String>,
    date: Option<DateTime<Utc>>,
}

impl From<GitHubCommit> for Commit {
    fn from(gh: GitHubCommit) -> Self {
        Commit {
            sha: gh.sha,
            message: gh.commit.message,
            author: gh.commit.author.map(|a| CommitAuthor {
                name: a.name,
                email: a.email,
                date: a.date,
            }),
        }
    }
}

/// Git tree response; only `tree` is consumed.
#[derive(Deserialize)]
struct GitHubTreeResponse {
    tree: Vec<GitHubTreeItem>,
}

#[derive(Deserialize)]
struct GitHubTreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Contents list item.
#[derive(Deserialize)]
struct GitHubContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Release list item.
#[derive(Deserialize)]
struct GitHubRelease {
    tag_name: String,
    name: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

impl From<GitHubRelease> for Release {
    fn from(gh: GitHubRelease) -> Self {
        Release {
            tag: gh.tag_name,
            name: gh.name,
            published_at: gh.published_at,
        }
    }
}

/// Contributor list item.
#[derive(Deserialize)]
struct GitHubContributor {
    login: String,
    contributions: u64,
}

impl From<GitHubContributor> for Contributor {
    fn from(gh: GitHubContributor) -> Self {
        Contributor {
            login: gh.login,
            contributions: gh.contributions,
        }
    }
}

/// README response; `content` is base64 with embedded newlines.
#[derive(Deserialize)]
struct GitHubReadme {
    content: String,
}

/// Branch or tag list item: a name plus a commit pointer.
#[derive(Deserialize)]
struct GitHubBranch {
    name: String,
    commit: GitHubCommitPointer,
}

#[derive(Deserialize)]
struct GitHubTag {
    name: String,
    commit: GitHubCommitPointer,
}

#[derive(Deserialize)]
struct GitHubCommitPointer {
    sha: String,
}
