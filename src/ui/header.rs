//! Header and navigation bar rendering

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::AppState;
use crate::selection::WizardStep;
use crate::theme::Styles;

/// Render the title line with the wizard step indicator.
pub fn render_header(f: &mut Frame, state: &AppState, area: Rect) {
    let title = Line::from(vec![
        Span::styled("Cassandra AMI Configurator", Styles::title()),
        Span::raw("  "),
        Span::styled(
            format!(
                "Step {}/{}: {}",
                state.step.step_number(),
                WizardStep::TOTAL_STEPS,
                state.step.title()
            ),
            Styles::label(),
        ),
    ]);
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), area);
}

/// Render the bottom navigation bar with key hints for the current context.
pub fn render_nav_bar(f: &mut Frame, state: &AppState, area: Rect) {
    let hints = if state.picker.is_some() {
        "↑/↓ select | Enter confirm | Esc cancel"
    } else {
        match state.step {
            WizardStep::Configure => "↑/↓ field | Enter choose | n next | q quit",
            WizardStep::Tools => "↑/↓ tool | Space toggle | n finish | b back | q quit",
            WizardStep::Summary => "Enter/g generate AMI | b back | q quit",
        }
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, Styles::nav_hint()))),
        area,
    );
}
