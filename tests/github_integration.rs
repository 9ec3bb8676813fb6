//! Integration tests for the GitHub host against a local mock server.
//!
//! Each test stands up a wiremock server, points a `GitHubHost` at it via
//! the custom API base, and checks both the returned values and the exact
//! requests issued.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use repolens::host::github::GitHubHost;
use repolens::host::{EntryKind, FetchError, RepoHost, RepoRef, NO_COMMIT_MESSAGE};

const TOKEN: &str = "test-token";

fn host_for(server: &MockServer) -> GitHubHost {
    GitHubHost::with_api_base(
        TOKEN,
        RepoRef::parse("octocat/hello-world").unwrap(),
        server.uri(),
    )
}

fn commit_json(sha: &str, message: &str) -> serde_json::Value {
    json!({
        "sha": sha,
        "commit": {
            "message": message,
            "author": {
                "name": "Ada",
                "email": "ada@example.com",
                "date": "2023-06-01T12:00:00Z"
            }
        }
    })
}

// =============================================================================
// Pagination Collector
// =============================================================================

mod pagination {
    use super::*;

    #[tokio::test]
    async fn collects_all_pages_until_empty() {
        let server = MockServer::start().await;

        // Two full pages of size 2, then the terminating empty page.
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("sha", "master"))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                commit_json("c1", "first"),
                commit_json("c2", "second"),
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                commit_json("c3", "third"),
                commit_json("c4", "fourth"),
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let host = host_for(&server);
        let commits = host.collect_all_commits("master", 2).await.unwrap();

        // 2 full pages of page_size 2 plus one empty page: 4 commits from
        // exactly 3 requests, order preserved.
        assert_eq!(commits.len(), 4);
        let shas: Vec<_> = commits.iter().map(|c| c.sha.as_str()).collect();
        assert_eq!(shas, vec!["c1", "c2", "c3", "c4"]);
        assert_eq!(commits[0].author.as_ref().unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn short_final_page_still_needs_empty_page() {
        let server = MockServer::start().await;

        // A page shorter than page_size does not terminate the walk; only
        // an observed empty page does.
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([commit_json("c1", "only")])),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let host = host_for(&server);
        let commits = host.collect_all_commits("master", 100).await.unwrap();
        assert_eq!(commits.len(), 1);
    }

    #[tokio::test]
    async fn fails_fast_on_page_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                commit_json("c1", "first"),
                commit_json("c2", "second"),
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"message": "server exploded"})),
            )
            .mount(&server)
            .await;

        let host = host_for(&server);
        match host.collect_all_commits("master", 2).await {
            Err(FetchError::Http { status: 500, message }) => {
                assert_eq!(message, "server exploded");
            }
            other => panic!("expected HTTP 500, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn sends_auth_and_user_agent_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(header("authorization", "token test-token"))
            .and(header("user-agent", "repolens-cli"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let host = host_for(&server);
        let commits = host.collect_all_commits("master", 100).await.unwrap();
        assert!(commits.is_empty());
    }
}

// =============================================================================
// Tree Resolver
// =============================================================================

mod tree {
    use super::*;

    #[tokio::test]
    async fn maps_tree_items_to_entries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/git/trees/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sha": "abc123",
                "tree": [
                    {"path": "src", "mode": "040000", "type": "tree", "sha": "t1"},
                    {"path": "main.rs", "mode": "100644", "type": "blob", "sha": "b1", "size": 120},
                ]
            })))
            .mount(&server)
            .await;

        let host = host_for(&server);
        let entries = host.list_directory("abc123").await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "src");
        assert_eq!(entries[0].kind, EntryKind::Dir);
        assert_eq!(entries[1].name, "main.rs");
        assert_eq!(entries[1].kind, EntryKind::File);
    }

    #[tokio::test]
    async fn missing_tree_is_http_404() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/git/trees/nope"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;

        let host = host_for(&server);
        match host.list_directory("nope").await {
            Err(FetchError::Http { status: 404, message }) => assert_eq!(message, "Not Found"),
            other => panic!("expected HTTP 404, got {:?}", other),
        }
    }
}

// =============================================================================
// Commit-Enriched Listing Builder
// =============================================================================

mod listing {
    use super::*;

    #[tokio::test]
    async fn one_enriched_entry_per_input_with_fallbacks() {
        let server = MockServer::start().await;
        let long_message = "x".repeat(100);

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/contents"))
            .and(query_param("ref", "master"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "src", "path": "src", "type": "dir", "sha": "s1"},
                {"name": "a.txt", "path": "a.txt", "type": "file", "sha": "s2"},
                {"name": "b.txt", "path": "b.txt", "type": "file", "sha": "s3"},
            ])))
            .mount(&server)
            .await;

        // src: a commit with an over-long message.
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("path", "src"))
            .and(query_param("sha", "headsha"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([commit_json("c-src", &long_message)])),
            )
            .mount(&server)
            .await;
        // a.txt: the probe fails outright.
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("path", "a.txt"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
            .mount(&server)
            .await;
        // b.txt: no commit touches the path.
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("path", "b.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let host = host_for(&server);
        let entries = host
            .list_with_latest_commits("master", "headsha", 70)
            .await
            .unwrap();

        // Every input entry is present, in input order.
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].name, "src");
        assert_eq!(entries[0].kind, EntryKind::Dir);
        assert_eq!(entries[0].latest_message, "x".repeat(70));
        assert_eq!(entries[0].latest_sha.as_deref(), Some("c-src"));

        // Failed probe degrades to the placeholder, not a missing entry.
        assert_eq!(entries[1].latest_message, NO_COMMIT_MESSAGE);
        assert!(entries[1].latest_sha.is_none());

        // Empty history degrades the same way.
        assert_eq!(entries[2].latest_message, NO_COMMIT_MESSAGE);
        assert!(entries[2].latest_sha.is_none());
    }

    #[tokio::test]
    async fn short_messages_pass_through_unchanged() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/contents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "lib.rs", "path": "lib.rs", "type": "file"},
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("path", "lib.rs"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([commit_json("c1", "tidy up")])),
            )
            .mount(&server)
            .await;

        let host = host_for(&server);
        let entries = host
            .list_with_latest_commits("master", "headsha", 70)
            .await
            .unwrap();
        assert_eq!(entries[0].latest_message, "tidy up");
    }

    #[tokio::test]
    async fn failed_directory_listing_fails_the_operation() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/contents"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;

        let host = host_for(&server);
        let result = host.list_with_latest_commits("master", "headsha", 70).await;
        assert!(matches!(result, Err(FetchError::Http { status: 404, .. })));
    }
}

// =============================================================================
// Metadata Fetchers
// =============================================================================

mod releases {
    use super::*;

    #[tokio::test]
    async fn counts_and_picks_newest() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/releases"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"tag_name": "v3.0.0", "name": "Three", "published_at": "2023-03-01T00:00:00Z"},
                {"tag_name": "v2.0.0", "name": "Two", "published_at": "2023-02-01T00:00:00Z"},
                {"tag_name": "v1.0.0", "name": null, "published_at": null},
            ])))
            .mount(&server)
            .await;

        let host = host_for(&server);
        let summary = host.latest_release().await.unwrap();
        assert_eq!(summary.release_count, 3);
        assert_eq!(summary.latest.unwrap().tag, "v3.0.0");
    }

    #[tokio::test]
    async fn zero_releases_is_zero_and_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/releases"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let host = host_for(&server);
        let summary = host.latest_release().await.unwrap();
        assert_eq!(summary.release_count, 0);
        assert!(summary.latest.is_none());
    }

    #[tokio::test]
    async fn transport_error_surfaces_as_err() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/releases"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "rate limit"})))
            .mount(&server)
            .await;

        let host = host_for(&server);
        match host.latest_release().await {
            Err(FetchError::Http { status: 403, message }) => assert_eq!(message, "rate limit"),
            other => panic!("expected HTTP 403, got {:?}", other),
        }
    }
}

mod languages {
    use super::*;

    #[tokio::test]
    async fn percentages_sum_and_order_by_size() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/languages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "C": 2500,
                "Rust": 7500,
            })))
            .mount(&server)
            .await;

        let host = host_for(&server);
        let breakdown = host.language_breakdown().await.unwrap();

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].language, "Rust");
        assert!((breakdown[0].percentage - 75.0).abs() < 1e-9);
        assert_eq!(breakdown[0].color, "#3572A5");
        assert_eq!(breakdown[1].language, "C");
        assert!((breakdown[1].percentage - 25.0).abs() < 1e-9);
        assert_eq!(breakdown[1].color, "#89E051");
        let total: f64 = breakdown.iter().map(|s| s.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn equal_sizes_tie_break_by_name() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/languages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Zig": 100,
                "Ada": 100,
            })))
            .mount(&server)
            .await;

        let host = host_for(&server);
        let breakdown = host.language_breakdown().await.unwrap();
        assert_eq!(breakdown[0].language, "Ada");
        assert_eq!(breakdown[1].language, "Zig");
    }

    #[tokio::test]
    async fn fourth_language_gets_a_derived_color() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/languages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "A": 400, "B": 300, "C": 200, "D": 100,
            })))
            .mount(&server)
            .await;

        let host = host_for(&server);
        let breakdown = host.language_breakdown().await.unwrap();
        let fourth = &breakdown[3];
        assert_eq!(fourth.color.len(), 7);
        assert!(fourth.color.starts_with('#'));
        assert_eq!(fourth.color, repolens::host::palette::color_for(3, "D"));
    }

    #[tokio::test]
    async fn empty_language_map_is_empty_breakdown() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/languages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let host = host_for(&server);
        assert!(host.language_breakdown().await.unwrap().is_empty());
    }
}

mod readme {
    use super::*;

    #[tokio::test]
    async fn decodes_wrapped_base64() {
        let server = MockServer::start().await;

        // "# Hello\n" encoded, wrapped mid-stream as GitHub does.
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/readme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "README.md",
                "encoding": "base64",
                "content": "IyBIZWxs\nbwo=\n"
            })))
            .mount(&server)
            .await;

        let host = host_for(&server);
        assert_eq!(host.readme().await.unwrap(), "# Hello\n");
    }

    #[tokio::test]
    async fn invalid_base64_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/readme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": "!!!not-base64!!!"
            })))
            .mount(&server)
            .await;

        let host = host_for(&server);
        assert!(matches!(host.readme().await, Err(FetchError::Decode(_))));
    }
}

mod summaries {
    use super::*;

    #[tokio::test]
    async fn contributors_in_upstream_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/contributors"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"login": "ada", "contributions": 120},
                {"login": "grace", "contributions": 40},
            ])))
            .mount(&server)
            .await;

        let host = host_for(&server);
        let contributors = host.contributors().await.unwrap();
        assert_eq!(contributors.len(), 2);
        assert_eq!(contributors[0].login, "ada");
        assert_eq!(contributors[0].contributions, 120);
    }

    #[tokio::test]
    async fn branches_and_tags_carry_shas() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/branches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "master", "commit": {"sha": "m1", "url": "ignored"}},
                {"name": "dev", "commit": {"sha": "d1"}},
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "v1.0.0", "commit": {"sha": "t1"}},
            ])))
            .mount(&server)
            .await;

        let host = host_for(&server);
        let branches = host.branches().await.unwrap();
        assert_eq!(branches[0].name, "master");
        assert_eq!(branches[0].sha, "m1");

        let tags = host.tags().await.unwrap();
        assert_eq!(tags[0].name, "v1.0.0");
        assert_eq!(tags[0].sha, "t1");
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        // Nothing listens on this port.
        let host = GitHubHost::with_api_base(
            TOKEN,
            RepoRef::parse("o/r").unwrap(),
            "http://127.0.0.1:9",
        );
        assert!(matches!(
            host.branches().await,
            Err(FetchError::Network(_))
        ));
    }
}
