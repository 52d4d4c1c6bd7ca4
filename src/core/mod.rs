//! Core functionality for streamgit
//!
//! This module contains shared business logic including:
//! - Application configuration
//! - Credential resolution
//! - Tabular shaping of fetched data
//! - Summary statistics and chart series

pub mod config;
pub mod credentials;
pub mod stats;
pub mod table;

pub use config::Config;
pub use credentials::{Credential, CredentialSource, CredentialSources};
pub use stats::RepoStats;
pub use table::{Cell, ExportTable};
