//! GitHub API client wrapper using octocrab

use octocrab::Octocrab;
use secrecy::ExposeSecret;

use crate::core::credentials::Credential;
use crate::error::{Result, StreamgitError};

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub API client wrapper
///
/// Holds an authenticated octocrab instance. Every accessor hits the API
/// directly; nothing is cached between calls.
pub struct GitHubClient {
    /// The octocrab instance
    inner: Octocrab,
}

impl GitHubClient {
    /// Create a client for the given credential
    ///
    /// `api_url` overrides the API endpoint (GitHub Enterprise, tests).
    pub fn new(credential: &Credential, api_url: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder();

        if let Some(url) = api_url.filter(|u| *u != DEFAULT_API_URL) {
            builder = builder
                .base_uri(url)
                .map_err(|e| StreamgitError::Config(format!("Invalid API URL '{}': {}", url, e)))?;
        }

        let octocrab = builder
            .personal_token(credential.token().expose_secret().to_string())
            .build()?;

        Ok(Self { inner: octocrab })
    }

    /// Get the inner octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.inner
    }

    /// Login of the account the token belongs to
    pub async fn viewer_login(&self) -> Result<String> {
        let user = self.inner.current().user().await?;
        tracing::debug!(login = %user.login, "authenticated");
        Ok(user.login)
    }
}
