//! Wire types for the GitHub REST endpoints used by streamgit
//!
//! Only the fields streamgit reads are declared; serde ignores the rest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account reference embedded in repository payloads
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerPayload {
    pub login: String,
}

/// `GET /user/repos`, `GET /user/starred`, `POST /user/repos` item
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    pub name: String,
    pub full_name: String,
    pub owner: OwnerPayload,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
}

/// Signature block inside a commit
#[derive(Debug, Clone, Deserialize)]
pub struct GitSignature {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Git-level commit data
#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub author: Option<GitSignature>,
    #[serde(default)]
    pub committer: Option<GitSignature>,
    pub message: String,
}

/// `GET /repos/{owner}/{repo}/commits` item
#[derive(Debug, Clone, Deserialize)]
pub struct CommitPayload {
    pub sha: String,
    pub commit: CommitDetail,
    /// GitHub account linked to the commit author, if any
    #[serde(default)]
    pub author: Option<OwnerPayload>,
}

/// Body of `POST /user/repos`
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepositoryBody<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub private: bool,
    pub auto_init: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitignore_template: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_template: Option<&'a str>,
}

/// Query for paged repository listings
#[derive(Debug, Clone, Serialize)]
pub struct ListParams<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<&'a str>,
    pub per_page: u8,
    pub page: u32,
}

/// Query for commit listings
#[derive(Debug, Clone, Serialize)]
pub struct CommitParams {
    pub per_page: u8,
}
