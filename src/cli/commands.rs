//! CLI command definitions using clap
//!
//! Defines the command structure for the `streamgit` CLI tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// streamgit - GitHub Repository Analytics
///
/// Repository statistics, exports and charts from the GitHub API.
/// Run without arguments to see the welcome screen.
#[derive(Parser, Debug)]
#[command(name = "streamgit", version, about, long_about = None)]
pub struct Cli {
    /// GitHub personal access token (takes precedence over the secrets file and GITHUB_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Secrets file containing `github_token` (default: .streamgit/secrets.toml)
    #[arg(long, global = true)]
    pub secrets_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display statistics for all your repositories
    Stats,

    /// List all your repositories
    List,

    /// Create a new repository
    Create(CreateArgs),

    /// Delete an existing repository
    Delete {
        /// Repository name
        #[arg(long)]
        name: String,
    },

    /// Export repository data to CSV/Excel
    Export(ExportArgs),

    /// Export starred repositories to CSV/Excel
    Stars(ExportArgs),

    /// Generate repository visualizations
    Visualize(VisualizeArgs),

    /// Show recent commits of one of your repositories
    Activity {
        /// Repository name (owned by you) or owner/name
        #[arg(long)]
        repo: String,

        /// Maximum number of commits to show
        #[arg(short = 'n', long, default_value = "5")]
        limit: usize,
    },

    /// Launch the interactive dashboard
    Dashboard,
}

// ─────────────────────────────────────────────────────────────────────────────
// Create
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Repository name
    #[arg(long)]
    pub name: String,

    /// Repository description
    #[arg(long)]
    pub description: Option<String>,

    /// Make the repository private
    #[arg(long)]
    pub private: bool,

    /// Initialize with a README
    #[arg(long)]
    pub auto_init: bool,

    /// .gitignore template (e.g. Rust, Python)
    #[arg(long)]
    pub gitignore_template: Option<String>,

    /// License template (e.g. mit, apache-2.0)
    #[arg(long)]
    pub license_template: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Export / Stars
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format (csv or xlsx)
    #[arg(long, default_value = "csv")]
    pub data_format: String,

    /// Output file (default: YYYYMMDD_<kind>_<login>.<ext>)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Visualize
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct VisualizeArgs {
    /// Visualization type: language_distribution, stars_vs_forks or creation_timeline
    #[arg(long = "type")]
    pub kind: String,

    /// Output file; the image extension is appended when missing
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Image format (png or svg)
    #[arg(long, default_value = "png")]
    pub image_format: String,
}
