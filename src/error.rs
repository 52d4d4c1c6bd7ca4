//! Custom error types for streamgit
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Main error type for the streamgit application
#[derive(Error, Debug)]
pub enum StreamgitError {
    /// No token found in any credential source
    #[error("GitHub token not found.\n\n  → Pass --token, or\n  → add github_token to .streamgit/secrets.toml, or\n  → set the GITHUB_TOKEN environment variable.")]
    MissingCredential,

    /// Token rejected by GitHub (401)
    #[error("GitHub authentication failed: {0}\n\n  → Check your GitHub token.\n  → Make sure the token has the necessary permissions (repo scope).")]
    Auth(String),

    /// GitHub signalled that the API rate limit is exhausted
    #[error("GitHub API rate limit exceeded: {0}\n\n  → Wait until the limit resets and try again.")]
    RateLimit(String),

    /// Transport failure talking to GitHub
    #[error("Network request failed: {0}\n\n  → Check your internet connection.")]
    Network(String),

    /// Repository or resource does not exist
    #[error("Not found: {0}\n\n  → Run 'streamgit list' to see your repositories.")]
    NotFound(String),

    /// Token lacks the scope required for the operation
    #[error("Permission denied: {0}\n\n  → Deleting repositories requires a token with the 'delete_repo' scope.")]
    Permission(String),

    /// Resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Input rejected locally or by GitHub (422)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unknown chart kind
    #[error("Unsupported chart type '{0}'.\n\n  → Available: language_distribution, stars_vs_forks, creation_timeline")]
    UnsupportedChart(String),

    /// Unknown export or image format
    #[error("Unsupported format '{0}'.\n\n  → Data formats: csv, xlsx. Image formats: png, svg.")]
    UnsupportedFormat(String),

    /// Any other GitHub API error
    #[error("GitHub API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Excel writer error
    #[error("Excel export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Chart drawing error
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// Terminal/TUI error
    #[error("Terminal error: {0}\n\n  → Try resizing your terminal or restarting it.")]
    Terminal(String),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),
}

impl From<toml::de::Error> for StreamgitError {
    fn from(err: toml::de::Error) -> Self {
        StreamgitError::Toml(err.to_string())
    }
}

impl From<octocrab::Error> for StreamgitError {
    fn from(err: octocrab::Error) -> Self {
        // Use the error handler to classify and provide actionable guidance
        crate::github::error_handler::classify_github_error(err)
    }
}

/// Result type alias using StreamgitError
pub type Result<T> = std::result::Result<T, StreamgitError>;
