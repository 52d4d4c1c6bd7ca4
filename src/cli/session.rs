//! Per-invocation setup shared by every CLI command

use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::credentials::CredentialSources;
use crate::error::Result;
use crate::github::GitHubClient;

/// Resolved configuration plus an authenticated client
pub struct Session {
    pub config: Config,
    pub client: GitHubClient,
}

impl Session {
    /// Load config, resolve the token and build the client
    ///
    /// Secrets file precedence: `--secrets-file` > config `secrets_file` > default.
    pub fn open(token: Option<String>, secrets_file: Option<PathBuf>) -> Result<Self> {
        let config = Config::load()?;
        let secrets_file = secrets_file.or_else(|| config.secrets_file.clone());

        let credential = CredentialSources::gather(token, secrets_file).resolve()?;
        let client = GitHubClient::new(&credential, Some(&config.effective_api_url()))?;

        Ok(Self { config, client })
    }
}
