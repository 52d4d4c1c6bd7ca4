//! GitHub API integration module
//!
//! This module provides all GitHub-related functionality:
//! - Authenticated client construction
//! - Repository listing, creation and deletion
//! - Starred repositories
//! - Commit activity
//! - Error classification

pub mod activity;
pub mod client;
pub mod error_handler;
pub mod models;
pub mod repos;

pub use activity::{ActivityHandler, ActivityRecord};
pub use client::GitHubClient;
pub use error_handler::classify_github_error;
pub use repos::{recent_repositories, CreateRepoParams, RepoHandler, RepositorySummary};
