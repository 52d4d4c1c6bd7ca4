//! CLI module for streamgit
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod activity;
pub mod commands;
pub mod export;
pub mod repo;
pub mod session;
pub mod stats;

pub use commands::{Cli, Commands};
pub use session::Session;

/// Banner shown when no subcommand is given
pub const WELCOME: &str = "\
🌊 StreamGit CLI
GitHub Analytics in your terminal

Usage: streamgit <command> [options]

Commands:
  stats       Display statistics for all your repositories
  list        List all your repositories
  create      Create a new repository
  delete      Delete an existing repository
  export      Export repository data to CSV/Excel
  stars       Export starred repositories to CSV/Excel
  visualize   Generate repository visualizations
  activity    Show recent commits of a repository
  dashboard   Launch the StreamGit dashboard

Examples:
  streamgit stats
  streamgit create --name \"new-repo\" --description \"My new repo\" --private
  streamgit export --data-format csv --output repos.csv
  streamgit visualize --type language_distribution --output langs.png

Use 'streamgit <command> --help' for more information about a command.";
