use devlens::config::{GitHubConfig, SearchConfig};
use devlens::github::GitHubClient;
use devlens::search::ProfileSearch;
use devlens::stats::{self, RepoBreakdown};
use devlens::Error;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

fn search_against(server: &ServerGuard) -> ProfileSearch {
    let github = GitHubConfig {
        token: None,
        api_base_url: server.url(),
        user_agent: "devlens-tests/0.1".to_string(),
        timeout_seconds: 5,
    };
    let client = GitHubClient::new(github).expect("client should build");
    ProfileSearch::new(client, SearchConfig::default())
}

fn profile_json() -> serde_json::Value {
    json!({
        "login": "octocat",
        "name": "The Octocat",
        "bio": null,
        "avatar_url": "https://example.com/avatar.png",
        "html_url": "https://example.com/octocat",
        "location": "San Francisco",
        "company": null,
        "blog": "",
        "public_repos": 8,
        "followers": 100,
        "following": 9,
        "created_at": "2011-01-25T18:44:36Z"
    })
}

fn repo_json(
    server_url: &str,
    name: &str,
    stars: u64,
    fork: bool,
    private: bool,
) -> serde_json::Value {
    json!({
        "name": name,
        "html_url": format!("https://example.com/octocat/{name}"),
        "description": "A test repository",
        "language": "Go",
        "stargazers_count": stars,
        "forks_count": 1,
        "private": private,
        "fork": fork,
        "updated_at": "2024-05-01T12:00:00Z",
        "languages_url": format!("{server_url}/repos/octocat/{name}/languages")
    })
}

async fn mock_profile(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/users/octocat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(profile_json().to_string())
        .create_async()
        .await
}

async fn mock_repos(server: &mut ServerGuard, body: &serde_json::Value) -> mockito::Mock {
    server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sort".into(), "updated".into()),
            Matcher::UrlEncoded("per_page".into(), "6".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

async fn mock_languages(
    server: &mut ServerGuard,
    repo: &str,
    body: &serde_json::Value,
) -> mockito::Mock {
    server
        .mock("GET", format!("/repos/octocat/{repo}/languages").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn test_profile_404_maps_to_user_not_found() {
    let mut server = Server::new_async().await;
    let _profile = server
        .mock("GET", "/users/octocat")
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .create_async()
        .await;

    let err = search_against(&server)
        .run("octocat")
        .await
        .expect_err("a 404 profile must fail the search");

    assert!(matches!(err, Error::UserNotFound), "got {err:?}");
    assert_eq!(
        err.to_string(),
        "User not found. Please check the username and try again."
    );
}

#[tokio::test]
async fn test_profile_403_maps_to_rate_limited() {
    let mut server = Server::new_async().await;
    let _profile = server
        .mock("GET", "/users/octocat")
        .with_status(403)
        .with_body(r#"{"message":"API rate limit exceeded"}"#)
        .create_async()
        .await;

    let err = search_against(&server)
        .run("octocat")
        .await
        .expect_err("a 403 profile must fail the search");

    assert!(matches!(err, Error::RateLimited), "got {err:?}");
    assert!(
        err.to_string().contains("GitHub token"),
        "message should point at the higher-rate-limit credential"
    );
}

#[tokio::test]
async fn test_other_profile_errors_carry_the_status() {
    let mut server = Server::new_async().await;
    let _profile = server
        .mock("GET", "/users/octocat")
        .with_status(502)
        .create_async()
        .await;

    let err = search_against(&server)
        .run("octocat")
        .await
        .expect_err("a 502 profile must fail the search");

    assert!(matches!(err, Error::Api(502)), "got {err:?}");
}

#[tokio::test]
async fn test_blank_username_is_rejected_before_any_request() {
    let mut server = Server::new_async().await;
    let nothing = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = search_against(&server)
        .run("   ")
        .await
        .expect_err("a blank username must fail locally");

    assert!(matches!(err, Error::Validation(_)), "got {err:?}");
    nothing.assert_async().await;
}

#[tokio::test]
async fn test_repo_fetch_failure_degrades_to_empty_list() {
    let mut server = Server::new_async().await;
    let _profile = mock_profile(&mut server).await;
    let _repos = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let result = search_against(&server)
        .run("octocat")
        .await
        .expect("a repository-list failure must not fail the search");

    assert!(result.repos.is_empty());
    assert!(result.language_stats.is_empty());
    assert_eq!(stats::total_stars(&result.repos), 0);
    assert_eq!(
        stats::repo_breakdown(&result.repos),
        RepoBreakdown {
            original: 0,
            forked: 0,
            total_public: 0,
        }
    );
}

#[tokio::test]
async fn test_profile_without_repositories() {
    let mut server = Server::new_async().await;
    let _profile = mock_profile(&mut server).await;
    let _repos = mock_repos(&mut server, &json!([])).await;

    let result = search_against(&server)
        .run("octocat")
        .await
        .expect("an empty repository list is a valid result");

    assert_eq!(result.profile.login, "octocat");
    assert!(result.repos.is_empty());
    assert!(result.language_stats.is_empty());
}

#[tokio::test]
async fn test_language_fetch_failure_is_isolated() {
    let mut server = Server::new_async().await;
    let url = server.url();

    let _profile = mock_profile(&mut server).await;
    let _repos = mock_repos(
        &mut server,
        &json!([
            repo_json(&url, "good", 1, false, false),
            repo_json(&url, "bad", 2, false, false),
        ]),
    )
    .await;
    let _good = mock_languages(&mut server, "good", &json!({"Rust": 1200, "Shell": 300})).await;
    let _bad = server
        .mock("GET", "/repos/octocat/bad/languages")
        .with_status(500)
        .create_async()
        .await;

    let result = search_against(&server)
        .run("octocat")
        .await
        .expect("one failed language fetch must not fail the search");

    // Both repositories stay in the display list; only the aggregate
    // silently loses the failed repository's contribution.
    assert_eq!(result.repos.len(), 2);
    assert_eq!(result.language_stats.get("Rust"), Some(&1200));
    assert_eq!(result.language_stats.get("Shell"), Some(&300));
    assert_eq!(result.language_stats.len(), 2);
}

#[tokio::test]
async fn test_token_is_attached_to_every_request() {
    let mut server = Server::new_async().await;
    let url = server.url();

    let profile = server
        .mock("GET", "/users/octocat")
        .match_header("authorization", "token sekrit")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(profile_json().to_string())
        .create_async()
        .await;
    let repos = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::Any)
        .match_header("authorization", "token sekrit")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([repo_json(&url, "solo", 0, false, false)]).to_string())
        .create_async()
        .await;
    let languages = server
        .mock("GET", "/repos/octocat/solo/languages")
        .match_header("authorization", "token sekrit")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"Go": 10}).to_string())
        .create_async()
        .await;

    let github = GitHubConfig {
        token: Some("sekrit".to_string()),
        api_base_url: url,
        user_agent: "devlens-tests/0.1".to_string(),
        timeout_seconds: 5,
    };
    let client = GitHubClient::new(github).expect("client should build");
    let search = ProfileSearch::new(client, SearchConfig::default());

    let result = search
        .run("octocat")
        .await
        .expect("authorized search should succeed");

    assert_eq!(result.language_stats.get("Go"), Some(&10));
    profile.assert_async().await;
    repos.assert_async().await;
    languages.assert_async().await;
}

#[tokio::test]
async fn test_octocat_end_to_end() {
    let mut server = Server::new_async().await;
    let url = server.url();

    let _profile = mock_profile(&mut server).await;
    let _repos = mock_repos(
        &mut server,
        &json!([
            repo_json(&url, "hello-world", 5, false, false),
            repo_json(&url, "forked-lib", 2, true, false),
        ]),
    )
    .await;
    let _hello = mock_languages(&mut server, "hello-world", &json!({"Go": 500})).await;
    let _forked = mock_languages(&mut server, "forked-lib", &json!({"Go": 300})).await;

    let result = search_against(&server)
        .run("octocat")
        .await
        .expect("stubbed search should succeed");

    assert_eq!(result.profile.public_repos, 8);
    assert_eq!(result.profile.followers, 100);
    assert_eq!(result.profile.following, 9);

    assert_eq!(result.repos.len(), 2);
    assert_eq!(stats::total_stars(&result.repos), 7);
    assert_eq!(
        stats::repo_breakdown(&result.repos),
        RepoBreakdown {
            original: 1,
            forked: 1,
            total_public: 2,
        }
    );

    assert_eq!(result.language_stats.get("Go"), Some(&800));
    assert_eq!(result.language_stats.len(), 1);
}

#[tokio::test]
async fn test_username_is_trimmed_before_the_request() {
    let mut server = Server::new_async().await;
    let _profile = mock_profile(&mut server).await;
    let _repos = mock_repos(&mut server, &json!([])).await;

    let result = search_against(&server)
        .run("  octocat ")
        .await
        .expect("surrounding whitespace must not reach the API");

    assert_eq!(result.profile.login, "octocat");
}
