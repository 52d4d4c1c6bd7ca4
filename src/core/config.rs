//! Application configuration management
//!
//! Reads application settings from `config.toml`. The file is never written;
//! users edit it by hand. Settings:
//! - Location of the secrets file holding the GitHub token
//! - GitHub API endpoint override
//! - Dashboard limits for recent repositories and commits

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{Result, StreamgitError};
use crate::github::client::DEFAULT_API_URL;

/// Environment variable overriding the API endpoint
pub const API_URL_ENV: &str = "GITHUB_API_URL";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Secrets file to read `github_token` from
    #[serde(default)]
    pub secrets_file: Option<PathBuf>,

    /// GitHub API base URL (GitHub Enterprise)
    #[serde(default)]
    pub api_url: Option<String>,

    /// Number of repositories shown under recent activity
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Number of commits fetched per repository
    #[serde(default = "default_commit_limit")]
    pub commit_limit: usize,
}

fn default_recent_limit() -> usize {
    10
}

fn default_commit_limit() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secrets_file: None,
            api_url: None,
            recent_limit: default_recent_limit(),
            commit_limit: default_commit_limit(),
        }
    }
}

impl Config {
    /// Load configuration from file, or defaults when there is none
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "streamgit", "streamgit")
            .ok_or_else(|| StreamgitError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// API endpoint: `GITHUB_API_URL` > config file > public GitHub
    pub fn effective_api_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.recent_limit, 10);
        assert_eq!(config.commit_limit, 5);
        assert_eq!(config.secrets_file, None);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "commit_limit = 3\nsecrets_file = \"/tmp/s.toml\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.commit_limit, 3);
        assert_eq!(config.recent_limit, 10);
        assert_eq!(config.secrets_file, Some(PathBuf::from("/tmp/s.toml")));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_loading_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let body = "# hand edited\nrecent_limit = 4\n";
        fs::write(&path, body).unwrap();

        assert_eq!(Config::load_from(&path).unwrap().recent_limit, 4);
        assert_eq!(fs::read_to_string(&path).unwrap(), body);

        let absent = dir.path().join("absent.toml");
        Config::load_from(&absent).unwrap();
        assert!(!absent.exists());
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "recent_limit = \"many\"").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(StreamgitError::Toml(_))
        ));
    }
}
