//! GitHub token resolution
//!
//! The token comes from exactly one source, chosen by precedence:
//!
//! 1. Value entered by the user (`--token`, dashboard login prompt)
//! 2. Secrets file with a `github_token` field
//! 3. `GITHUB_TOKEN` environment variable
//!
//! The resolved token lives only in memory. Nothing here writes it anywhere.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{Result, StreamgitError};

/// Environment variable holding the token
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Secrets file consulted when none is configured
pub const DEFAULT_SECRETS_FILE: &str = ".streamgit/secrets.toml";

/// Where a credential came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Interactive,
    SecretsFile,
    Environment,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interactive => write!(f, "user input"),
            Self::SecretsFile => write!(f, "secrets file"),
            Self::Environment => write!(f, "{}", GITHUB_TOKEN_ENV),
        }
    }
}

/// A resolved GitHub token
#[derive(Clone)]
pub struct Credential {
    token: SecretString,
    source: CredentialSource,
}

impl Credential {
    pub fn new(token: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            token: SecretString::from(token.into()),
            source,
        }
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// Masked token for display
    pub fn masked(&self) -> String {
        mask_token(&self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &self.masked())
            .field("source", &self.source)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct SecretsFile {
    github_token: Option<String>,
}

/// Candidate values from every credential source
#[derive(Debug, Clone, Default)]
pub struct CredentialSources {
    /// Value typed by the user
    pub interactive: Option<String>,
    /// Secrets file to read
    pub secrets_file: Option<PathBuf>,
    /// Value of `GITHUB_TOKEN`
    pub env_token: Option<String>,
}

impl CredentialSources {
    /// Collect sources, reading `GITHUB_TOKEN` from the process environment
    pub fn gather(interactive: Option<String>, secrets_file: Option<PathBuf>) -> Self {
        Self {
            interactive,
            secrets_file: Some(secrets_file.unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_FILE))),
            env_token: std::env::var(GITHUB_TOKEN_ENV).ok(),
        }
    }

    /// Pick the highest-precedence non-empty token
    pub fn resolve(&self) -> Result<Credential> {
        if let Some(token) = non_empty(self.interactive.as_deref()) {
            return Ok(resolved(token, CredentialSource::Interactive));
        }

        if let Some(path) = &self.secrets_file {
            if let Some(token) = read_secrets_file(path)? {
                return Ok(resolved(&token, CredentialSource::SecretsFile));
            }
        }

        if let Some(token) = non_empty(self.env_token.as_deref()) {
            return Ok(resolved(token, CredentialSource::Environment));
        }

        Err(StreamgitError::MissingCredential)
    }
}

fn resolved(token: &str, source: CredentialSource) -> Credential {
    tracing::debug!(%source, "resolved GitHub token");
    Credential::new(token, source)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Read `github_token` from a TOML secrets file
///
/// A missing file or a file without the field yields `None`; a malformed
/// file is an error.
pub fn read_secrets_file(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let secrets: SecretsFile = toml::from_str(&contents)?;

    Ok(non_empty(secrets.github_token.as_deref()).map(str::to_string))
}

/// Get a masked version of a token for display (shows first 4 and last 4 chars)
pub fn mask_token(token: &SecretString) -> String {
    let chars: Vec<char> = token.expose_secret().chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secrets(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("secrets.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_mask_token() {
        let short = SecretString::from("abc");
        assert_eq!(mask_token(&short), "***");

        let long = SecretString::from("ghp_1234567890abcdef");
        assert_eq!(mask_token(&long), "ghp_...cdef");
    }

    #[test]
    fn test_mask_token_with_multibyte_chars() {
        let credential = Credential::new("ghp\u{e9}_abcdefgh", CredentialSource::Interactive);
        assert_eq!(credential.masked(), "ghp\u{e9}...efgh");

        let tail = SecretString::from("abcdefgh\u{1f600}\u{e9}");
        assert_eq!(mask_token(&tail), "abcd...gh\u{1f600}\u{e9}");

        let short = SecretString::from("\u{e9}\u{e9}\u{e9}");
        assert_eq!(mask_token(&short), "***");
    }

    #[test]
    fn test_interactive_beats_file_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let sources = CredentialSources {
            interactive: Some("typed".into()),
            secrets_file: Some(secrets(&dir, "github_token = \"from-file\"")),
            env_token: Some("from-env".into()),
        };

        let credential = sources.resolve().unwrap();
        assert_eq!(credential.token().expose_secret(), "typed");
        assert_eq!(credential.source(), CredentialSource::Interactive);
    }

    #[test]
    fn test_file_beats_env() {
        let dir = tempfile::tempdir().unwrap();
        let sources = CredentialSources {
            interactive: Some("   ".into()),
            secrets_file: Some(secrets(&dir, "github_token = \"from-file\"")),
            env_token: Some("from-env".into()),
        };

        let credential = sources.resolve().unwrap();
        assert_eq!(credential.token().expose_secret(), "from-file");
        assert_eq!(credential.source(), CredentialSource::SecretsFile);
    }

    #[test]
    fn test_env_used_when_file_lacks_token() {
        let dir = tempfile::tempdir().unwrap();
        let sources = CredentialSources {
            interactive: None,
            secrets_file: Some(secrets(&dir, "other = 1")),
            env_token: Some("from-env".into()),
        };

        let credential = sources.resolve().unwrap();
        assert_eq!(credential.token().expose_secret(), "from-env");
        assert_eq!(credential.source(), CredentialSource::Environment);
    }

    #[test]
    fn test_missing_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let sources = CredentialSources {
            interactive: None,
            secrets_file: Some(dir.path().join("absent.toml")),
            env_token: Some(String::new()),
        };

        assert!(matches!(
            sources.resolve(),
            Err(StreamgitError::MissingCredential)
        ));
    }

    #[test]
    fn test_malformed_secrets_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let sources = CredentialSources {
            interactive: None,
            secrets_file: Some(secrets(&dir, "github_token = ")),
            env_token: Some("from-env".into()),
        };

        assert!(matches!(sources.resolve(), Err(StreamgitError::Toml(_))));
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let credential = Credential::new("ghp_1234567890abcdef", CredentialSource::Environment);
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("1234567890"));
        assert!(debug.contains("ghp_...cdef"));
    }
}
