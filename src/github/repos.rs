//! Repository operations: listing, starring, creation and deletion

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, StreamgitError};
use crate::github::client::GitHubClient;
use crate::github::models::{CreateRepositoryBody, ListParams, RepositoryPayload};

/// Largest page GitHub serves for list endpoints
const PAGE_SIZE: u8 = 100;

/// GitHub's limit on repository name length
const MAX_NAME_LEN: usize = 100;

static REPO_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+$").expect("Invalid regex pattern for repository names")
});

/// Read-only projection of a remote repository
#[derive(Debug, Clone, PartialEq)]
pub struct RepositorySummary {
    pub name: String,
    pub full_name: String,
    pub owner: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub private: bool,
    pub fork: bool,
    pub archived: bool,
    pub stars: u64,
    pub forks: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub url: String,
}

impl From<RepositoryPayload> for RepositorySummary {
    fn from(p: RepositoryPayload) -> Self {
        Self {
            name: p.name,
            full_name: p.full_name,
            owner: p.owner.login,
            description: p.description,
            language: p.language,
            private: p.private,
            fork: p.fork,
            archived: p.archived,
            stars: p.stargazers_count,
            forks: p.forks_count,
            created_at: p.created_at,
            updated_at: p.updated_at,
            url: p.html_url,
        }
    }
}

/// Parameters for repository creation
#[derive(Debug, Clone, Default)]
pub struct CreateRepoParams {
    pub name: String,
    pub description: Option<String>,
    pub private: bool,
    /// Create an initial commit with a README
    pub auto_init: bool,
    pub gitignore_template: Option<String>,
    pub license_template: Option<String>,
}

/// Repository operations handler
pub struct RepoHandler<'a> {
    client: &'a GitHubClient,
}

impl<'a> RepoHandler<'a> {
    /// Create a new handler
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// List every repository visible to the token, most recently updated first
    pub async fn list(&self) -> Result<Vec<RepositorySummary>> {
        // GitHub API: GET /user/repos
        let repos = self
            .fetch_all("/user/repos", Some("all"), Some("updated"), Some("desc"))
            .await?;
        tracing::debug!(count = repos.len(), "listed repositories");
        Ok(repos)
    }

    /// List repositories starred by the token's account
    pub async fn list_starred(&self) -> Result<Vec<RepositorySummary>> {
        // GitHub API: GET /user/starred
        let repos = self.fetch_all("/user/starred", None, None, None).await?;
        tracing::debug!(count = repos.len(), "listed starred repositories");
        Ok(repos)
    }

    /// Create a repository under the token's account
    pub async fn create(&self, params: &CreateRepoParams) -> Result<RepositorySummary> {
        validate_repo_name(&params.name)?;

        let body = CreateRepositoryBody {
            name: &params.name,
            description: params.description.as_deref(),
            private: params.private,
            auto_init: params.auto_init,
            gitignore_template: params.gitignore_template.as_deref(),
            license_template: params.license_template.as_deref(),
        };

        // GitHub API: POST /user/repos
        let created: RepositoryPayload = self
            .client
            .octocrab()
            .post("/user/repos", Some(&body))
            .await?;

        tracing::info!(repo = %created.full_name, private = params.private, "created repository");
        Ok(created.into())
    }

    /// Delete `owner/name`
    pub async fn delete(&self, owner: &str, name: &str) -> Result<()> {
        // GitHub API: DELETE /repos/{owner}/{repo}
        self.client.octocrab().repos(owner, name).delete().await?;

        tracing::info!(repo = %format!("{}/{}", owner, name), "deleted repository");
        Ok(())
    }

    /// Follow `page` until GitHub returns a short page
    async fn fetch_all(
        &self,
        route: &str,
        kind: Option<&str>,
        sort: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Vec<RepositorySummary>> {
        let mut repos = Vec::new();
        let mut page = 1;

        loop {
            let params = ListParams {
                kind,
                sort,
                direction,
                per_page: PAGE_SIZE,
                page,
            };

            let batch: Vec<RepositoryPayload> =
                self.client.octocrab().get(route, Some(&params)).await?;
            let short_page = batch.len() < PAGE_SIZE as usize;

            repos.extend(batch.into_iter().map(RepositorySummary::from));

            if short_page {
                break;
            }
            page += 1;
        }

        Ok(repos)
    }
}

/// Reject names GitHub would refuse before making a request
pub fn validate_repo_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StreamgitError::Validation(
            "Repository name cannot be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(StreamgitError::Validation(format!(
            "Repository name is longer than {} characters",
            MAX_NAME_LEN
        )));
    }
    if name == "." || name == ".." {
        return Err(StreamgitError::Validation(format!(
            "'{}' is a reserved name",
            name
        )));
    }
    if !REPO_NAME_PATTERN.is_match(name) {
        return Err(StreamgitError::Validation(format!(
            "'{}' may only contain letters, digits, '.', '-' and '_'",
            name
        )));
    }
    Ok(())
}

/// The `limit` most recently updated repositories, newest first
pub fn recent_repositories(repos: &[RepositorySummary], limit: usize) -> Vec<RepositorySummary> {
    let mut sorted = repos.to_vec();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn repo(name: &str, day: u32) -> RepositorySummary {
        let ts = Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
        RepositorySummary {
            name: name.to_string(),
            full_name: format!("octo/{}", name),
            owner: "octo".to_string(),
            description: None,
            language: None,
            private: false,
            fork: false,
            archived: false,
            stars: 0,
            forks: 0,
            created_at: ts,
            updated_at: ts,
            url: format!("https://github.com/octo/{}", name),
        }
    }

    #[test]
    fn test_valid_names() {
        assert!(validate_repo_name("streamgit").is_ok());
        assert!(validate_repo_name("my.repo_name-2").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        for bad in ["", ".", "..", "has space", "slash/name", "emoji🚀"] {
            assert!(
                matches!(validate_repo_name(bad), Err(StreamgitError::Validation(_))),
                "{:?} should be rejected",
                bad
            );
        }
        assert!(validate_repo_name(&"a".repeat(101)).is_err());
        assert!(validate_repo_name(&"a".repeat(100)).is_ok());
    }

    #[test]
    fn test_recent_repositories_sorts_and_limits() {
        let repos = vec![repo("old", 1), repo("newest", 20), repo("mid", 10)];
        let recent = recent_repositories(&repos, 2);
        let names: Vec<_> = recent.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["newest", "mid"]);
    }
}
