use artifact_report_core::config::ReportConfig;
use artifact_report_core::contract::SourceControl;
use artifact_report_core::error::FetchError;
use artifact_report_core::github::GitHubClient;
use artifact_report_core::report::ReportAggregator;
use mockito::{Matcher, Server};

fn page_query(per_page: &str, page: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("per_page".into(), per_page.into()),
        Matcher::UrlEncoded("page".into(), page.into()),
    ])
}

#[tokio::test]
async fn lists_org_repositories_with_auth_and_paging_parameters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/orgs/acme/repos")
        .match_query(page_query("100", "1"))
        .match_header("authorization", "Bearer secret-token")
        .match_header("accept", "application/vnd.github+json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id": 1, "name": "api", "full_name": "acme/api", "private": false},
                {"id": 2, "name": "web", "full_name": "acme/web", "private": true}
            ]"#,
        )
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), Some("secret-token".to_string())).unwrap();
    let repos = client.list_org_repos_page("acme", 100, 1).await.unwrap();

    mock.assert_async().await;
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].name, "api");
    assert_eq!(repos[1].full_name, "acme/web");
}

#[tokio::test]
async fn lists_repository_artifacts_page() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/repos/acme/api/actions/artifacts")
        .match_query(page_query("50", "2"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "total_count": 52,
                "artifacts": [
                    {"id": 11, "name": "coverage", "size_in_bytes": 2048, "expired": false},
                    {"id": 12, "name": "dist", "size_in_bytes": 512, "expired": true}
                ]
            }"#,
        )
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), None).unwrap();
    let listing = client
        .list_repo_artifacts_page("acme", "api", 50, 2)
        .await
        .unwrap();

    assert_eq!(listing.total_count, 52);
    assert_eq!(listing.artifacts.len(), 2);
    assert_eq!(listing.artifacts[0].size_in_bytes, 2048);
    assert!(listing.artifacts[1].expired);
}

#[tokio::test]
async fn error_status_is_returned_with_body() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/orgs/acme/repos")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"Bad credentials"}"#)
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), Some("bad".to_string())).unwrap();
    let err = client.list_org_repos_page("acme", 100, 1).await.unwrap_err();

    match err {
        FetchError::Status { status, body, .. } => {
            assert_eq!(status, 401);
            assert!(body.contains("Bad credentials"));
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/repos/acme/api/actions/artifacts")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"artifacts": "not-a-list"}"#)
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), None).unwrap();
    let err = client
        .list_repo_artifacts_page("acme", "api", 100, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn aggregates_an_organization_over_http() {
    let mut server = Server::new_async().await;
    let _repos = server
        .mock("GET", "/orgs/acme/repos")
        .match_query(page_query("2", "1"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"name": "A", "full_name": "acme/A"}, {"name": "B", "full_name": "acme/B"}]"#,
        )
        .create_async()
        .await;
    let _repos_tail = server
        .mock("GET", "/orgs/acme/repos")
        .match_query(page_query("2", "2"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;
    let _a = server
        .mock("GET", "/repos/acme/A/actions/artifacts")
        .match_query(page_query("2", "1"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"total_count": 0, "artifacts": []}"#)
        .create_async()
        .await;
    let _b1 = server
        .mock("GET", "/repos/acme/B/actions/artifacts")
        .match_query(page_query("2", "1"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"total_count": 3, "artifacts": [{"size_in_bytes": 1024}, {"size_in_bytes": 2048}]}"#,
        )
        .create_async()
        .await;
    let b2 = server
        .mock("GET", "/repos/acme/B/actions/artifacts")
        .match_query(page_query("2", "2"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"total_count": 3, "artifacts": [{"size_in_bytes": 512}]}"#)
        .expect(1)
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), Some("token".to_string())).unwrap();
    let config = ReportConfig {
        page_size: 2,
        ..ReportConfig::for_org("acme")
    };
    let report = ReportAggregator::new(&client, &config)
        .aggregate()
        .await
        .unwrap();

    b2.assert_async().await;
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].name, "acme/B");
    assert_eq!(report.rows[0].count, 3);
    assert_eq!(report.rows[0].total_size_in_bytes, 3584);
    assert_eq!(report.rows[0].total_size_human_readable, "3.50 KB");
}
