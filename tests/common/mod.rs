//! Shared fixtures for the GitHub mock server tests

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use streamgit::core::credentials::{Credential, CredentialSource};
use streamgit::github::GitHubClient;

pub const LOGIN: &str = "octocat";

/// Start a mock server answering `GET /user` for [`LOGIN`]
pub async fn setup_mock_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(LOGIN)))
        .mount(&server)
        .await;

    server
}

pub fn client_for(server: &MockServer) -> GitHubClient {
    let credential = Credential::new("ghp_test_token", CredentialSource::Environment);
    GitHubClient::new(&credential, Some(&server.uri())).expect("client should build")
}

pub fn user_json(login: &str) -> Value {
    let base = format!("https://api.github.com/users/{}", login);
    json!({
        "login": login,
        "id": 1,
        "node_id": "MDQ6VXNlcjE=",
        "avatar_url": "https://github.com/images/error/octocat_happy.gif",
        "gravatar_id": "",
        "url": base,
        "html_url": format!("https://github.com/{}", login),
        "followers_url": format!("{}/followers", base),
        "following_url": format!("{}/following{{/other_user}}", base),
        "gists_url": format!("{}/gists{{/gist_id}}", base),
        "starred_url": format!("{}/starred{{/owner}}{{/repo}}", base),
        "subscriptions_url": format!("{}/subscriptions", base),
        "organizations_url": format!("{}/orgs", base),
        "repos_url": format!("{}/repos", base),
        "events_url": format!("{}/events{{/privacy}}", base),
        "received_events_url": format!("{}/received_events", base),
        "type": "User",
        "site_admin": false
    })
}

pub fn repo_json(owner: &str, name: &str, language: Option<&str>, stars: u64) -> Value {
    json!({
        "name": name,
        "full_name": format!("{}/{}", owner, name),
        "owner": { "login": owner },
        "description": format!("{} description", name),
        "language": language,
        "private": false,
        "fork": false,
        "archived": false,
        "stargazers_count": stars,
        "forks_count": stars / 2,
        "created_at": "2023-01-15T10:00:00Z",
        "updated_at": "2024-02-01T08:30:00Z",
        "html_url": format!("https://github.com/{}/{}", owner, name)
    })
}

pub fn error_json(message: &str) -> Value {
    json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest"
    })
}
