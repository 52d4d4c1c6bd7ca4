//! Dashboard colours

use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    /// Accent for borders, labels and chart bars
    pub const PRIMARY: Color = Color::Cyan;
    /// Stars and the active tab
    pub const STAR: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const MUTED: Color = Color::DarkGray;

    pub fn header() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn tab_active() -> Style {
        Style::default().fg(Self::STAR).add_modifier(Modifier::BOLD)
    }

    pub fn status_bar() -> Style {
        Style::default().bg(Self::MUTED)
    }

    /// Highlighted table row
    pub fn selected() -> Style {
        Style::default().bg(Self::PRIMARY).fg(Color::Black)
    }

    pub fn label() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn value() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn stars() -> Style {
        Style::default().fg(Self::STAR)
    }

    /// Visibility column: private repositories stand out
    pub fn visibility(private: bool) -> Style {
        if private {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::Green)
        }
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }
}
