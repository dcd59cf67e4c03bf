//! Centralized theme and styling for the TUI
//!
//! Single source of truth for colors and styles used by the wizard screens,
//! so the rendering code never hardcodes a color.

use ratatui::style::{Color, Modifier, Style};

/// Core color palette for the application
pub struct Colors;

impl Colors {
    /// Primary dark background for panels and popups
    pub const BG_PRIMARY: Color = Color::Rgb(20, 24, 32);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/placeholder text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Accent for titles and the focused field
    pub const ACCENT: Color = Color::Cyan;

    /// Success results (AMI created)
    pub const SUCCESS: Color = Color::Green;

    /// Errors and failed builds
    pub const ERROR: Color = Color::Red;

    /// In-flight fetches and submissions
    pub const PENDING: Color = Color::Yellow;
}

/// Pre-built styles for common UI elements
pub struct Styles;

impl Styles {
    /// Screen and popup titles
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Field labels
    pub fn label() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Selected values
    pub fn value() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Unset values and unavailable options
    pub fn placeholder() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// The focused field or highlighted picker row
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Persistent error lines
    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }

    /// Success lines
    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    /// Loading/pending indicators
    pub fn pending() -> Style {
        Style::default().fg(Colors::PENDING)
    }

    /// Navigation bar hints
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }
}
