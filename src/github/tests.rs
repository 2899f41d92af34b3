use super::*;
use crate::errors::DraftPrError;
use crate::github::client::{api_url_from, DEFAULT_API_URL};
use crate::github::types::ApiError;
use crate::remote::RepoSlug;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn widgets() -> RepoSlug {
    RepoSlug {
        owner: "acme".to_string(),
        name: "widgets".to_string(),
    }
}

/// The blocking client must not run on the async test thread
async fn create_on(
    server_uri: String,
    pull: NewPullRequest,
) -> crate::errors::Result<PullRequest> {
    tokio::task::spawn_blocking(move || {
        let client = GitHubClient::new("secret", &server_uri)?;
        client.create_pull_request(&widgets(), &pull)
    })
    .await
    .unwrap()
}

#[test]
fn test_new_draft_pull_request() {
    let pull = NewPullRequest::draft("Add email validation", "feature-123", "develop");

    assert_eq!(pull.title, "Add email validation");
    assert_eq!(pull.body, "Add email validation");
    assert_eq!(pull.head, "feature-123");
    assert_eq!(pull.base, "develop");
    assert!(pull.draft);
    assert!(pull.maintainer_can_modify);
}

#[test]
fn test_new_pull_request_wire_format() {
    let pull = NewPullRequest::draft("Fix login", "bugfix-77", "main");

    assert_eq!(
        serde_json::to_value(&pull).unwrap(),
        json!({
            "title": "Fix login",
            "head": "bugfix-77",
            "base": "main",
            "body": "Fix login",
            "draft": true,
            "maintainer_can_modify": true,
        })
    );
}

#[test]
fn test_api_url_from() {
    assert_eq!(api_url_from(None), DEFAULT_API_URL);
    assert_eq!(api_url_from(Some(String::new())), "https://api.github.com");
    assert_eq!(api_url_from(Some("  \n".to_string())), DEFAULT_API_URL);
    assert_eq!(
        api_url_from(Some(" https://github.example.com/api/v3 ".to_string())),
        "https://github.example.com/api/v3"
    );
}

#[test]
fn test_api_error_describe() {
    let error: ApiError = serde_json::from_value(json!({
        "message": "Validation Failed",
        "errors": [
            { "resource": "PullRequest", "code": "custom", "message": "A pull request already exists for acme:feature-1." },
            { "resource": "PullRequest", "field": "head", "code": "invalid" }
        ],
        "documentation_url": "https://docs.github.com/rest/pulls/pulls#create-a-pull-request"
    }))
    .unwrap();

    assert_eq!(
        error.describe(),
        "Validation Failed (A pull request already exists for acme:feature-1.; head invalid)"
    );

    let bare: ApiError = serde_json::from_value(json!({ "message": "Bad credentials" })).unwrap();
    assert_eq!(bare.describe(), "Bad credentials");
}

#[tokio::test]
async fn test_create_pull_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/pulls"))
        .and(header("authorization", "Bearer secret"))
        .and(header("accept", "application/vnd.github+json"))
        .and(header("x-github-api-version", "2022-11-28"))
        .and(header(
            "user-agent",
            concat!("git-draft-pr/", env!("CARGO_PKG_VERSION")),
        ))
        .and(body_json(json!({
            "title": "Add email validation",
            "head": "feature-123",
            "base": "develop",
            "body": "Add email validation",
            "draft": true,
            "maintainer_can_modify": true,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 42,
            "html_url": "https://github.com/acme/widgets/pull/42",
            "draft": true,
            "state": "open",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pull = NewPullRequest::draft("Add email validation", "feature-123", "develop");
    let created = create_on(server.uri(), pull).await.unwrap();

    assert_eq!(created.number, 42);
    assert_eq!(created.html_url, "https://github.com/acme/widgets/pull/42");
    assert!(created.draft);
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/pulls"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 7,
            "html_url": "https://github.com/acme/widgets/pull/7",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pull = NewPullRequest::draft("Title", "feature", "develop");
    let created = create_on(format!("{}/", server.uri()), pull).await.unwrap();

    assert_eq!(created.number, 7);
    assert!(!created.draft);
}

#[tokio::test]
async fn test_validation_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/pulls"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{ "code": "custom", "message": "No commits between develop and feature" }],
        })))
        .mount(&server)
        .await;

    let pull = NewPullRequest::draft("Title", "feature", "develop");
    let err = create_on(server.uri(), pull).await.unwrap_err();

    match err {
        DraftPrError::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Validation Failed (No commits between develop and feature)");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_kept() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let pull = NewPullRequest::draft("Title", "feature", "develop");
    let err = create_on(server.uri(), pull).await.unwrap_err();

    assert!(matches!(
        err,
        DraftPrError::Api { status: 502, ref message } if message == "upstream unavailable"
    ));
}

#[tokio::test]
async fn test_malformed_success_body_is_a_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let pull = NewPullRequest::draft("Title", "feature", "develop");
    let err = create_on(server.uri(), pull).await.unwrap_err();

    assert!(matches!(err, DraftPrError::Json(_)));
}
