//! Terminal dashboard
//!
//! Tabbed ratatui interface over the same handlers the CLI uses.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
