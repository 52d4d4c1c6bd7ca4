//! streamgit - GitHub repository analytics and management
//!
//! This library provides both CLI and TUI interfaces for inspecting the
//! repositories of a GitHub account: statistics, commit activity, starred
//! repositories, CSV/Excel exports and chart images, plus repository
//! creation and deletion.

pub mod cli;
pub mod core;
pub mod error;
pub mod github;
pub mod render;
pub mod tui;

pub use error::{Result, StreamgitError};
