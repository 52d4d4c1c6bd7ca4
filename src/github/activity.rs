//! Commit activity operations

use chrono::{DateTime, Utc};

use crate::error::{Result, StreamgitError};
use crate::github::client::GitHubClient;
use crate::github::models::{CommitParams, CommitPayload};

/// One commit in a repository's history
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    /// Repository the commit belongs to
    pub repository: String,
    pub sha: String,
    pub author: String,
    /// GitHub account linked to the commit, if any
    pub author_login: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub message: String,
}

impl ActivityRecord {
    fn from_payload(repository: &str, p: CommitPayload) -> Self {
        let signature = p.commit.author.as_ref().or(p.commit.committer.as_ref());

        let author_login = p.author.map(|a| a.login);
        let author = signature
            .and_then(|s| s.name.clone())
            .or_else(|| author_login.clone())
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            repository: repository.to_string(),
            sha: p.sha,
            author,
            author_login,
            date: signature.and_then(|s| s.date),
            message: p.commit.message,
        }
    }

    /// Abbreviated SHA for display
    pub fn short_sha(&self) -> &str {
        &self.sha[..7.min(self.sha.len())]
    }

    /// First line of the commit message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Whether `login` wrote this commit, by linked account or author name
    pub fn is_by(&self, login: &str) -> bool {
        self.author_login
            .as_deref()
            .is_some_and(|a| a.eq_ignore_ascii_case(login))
            || self.author.eq_ignore_ascii_case(login)
    }
}

/// Commit activity handler
pub struct ActivityHandler<'a> {
    client: &'a GitHubClient,
}

impl<'a> ActivityHandler<'a> {
    /// Create a new handler
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Latest commits of `owner/repo`, newest first, at most `limit`
    ///
    /// An empty repository yields no records rather than an error.
    pub async fn recent_commits(
        &self,
        owner: &str,
        repo: &str,
        limit: usize,
    ) -> Result<Vec<ActivityRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        // GitHub API: GET /repos/{owner}/{repo}/commits
        let route = format!("/repos/{}/{}/commits", owner, repo);
        let params = CommitParams {
            per_page: limit.min(100) as u8,
        };

        let commits: Vec<CommitPayload> =
            match self.client.octocrab().get(&route, Some(&params)).await {
                Ok(commits) => commits,
                Err(e) => match StreamgitError::from(e) {
                    // 409: "Git Repository is empty."
                    StreamgitError::Conflict(_) => {
                        tracing::debug!(repo = %route, "repository has no commits");
                        return Ok(Vec::new());
                    }
                    other => return Err(other),
                },
            };

        Ok(commits
            .into_iter()
            .take(limit)
            .map(|c| ActivityRecord::from_payload(repo, c))
            .collect())
    }
}
