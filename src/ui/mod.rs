//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Title line and navigation bar rendering
//! - `screens` - The three wizard screens and the option picker
//!
//! Rendering is a pure view over `AppState`; all mutation happens in the
//! `app` module.

mod header;
mod screens;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::AppState;

/// UI renderer for the application
///
/// Main entry point for rendering; delegates to the screen submodules.
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    /// Create a new UI renderer
    pub fn new() -> Self {
        Self
    }

    /// Render the complete UI based on application state
    pub fn render(&self, f: &mut Frame, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(1),    // Step content
                Constraint::Length(1), // Navigation bar
            ])
            .split(f.area());

        header::render_header(f, state, chunks[0]);
        screens::render_step(f, state, chunks[1]);
        header::render_nav_bar(f, state, chunks[2]);

        // The picker renders on top of whatever screen opened it
        if state.picker.is_some() {
            screens::render_picker(f, state);
        }
    }
}
