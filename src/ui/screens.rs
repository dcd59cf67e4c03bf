//! Wizard screen rendering
//!
//! One render function per wizard step plus the option-picker popup. All
//! functions are thin views over `AppState`; no state is mutated here.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};
use strum::IntoEnumIterator;

use crate::app::{AppState, ConfigureField};
use crate::catalog::CatalogStatus;
use crate::payload::compose_cassandra_version;
use crate::selection::WizardStep;
use crate::theme::{Colors, Styles};
use crate::types::{ToolKind, REQUIRED_TOOLS};

/// Render the content area for the current wizard step.
pub fn render_step(f: &mut Frame, state: &AppState, area: Rect) {
    match state.step {
        WizardStep::Configure => render_configure(f, state, area),
        WizardStep::Tools => render_tools(f, state, area),
        WizardStep::Summary => render_summary(f, state, area),
    }
}

// ============================================================================
// Configure screen
// ============================================================================

fn render_configure(f: &mut Frame, state: &AppState, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    // The majors fetch failure is the only catalog error surfaced to the user
    if let Some(message) = state.catalogs.majors.failure() {
        lines.push(Line::from(Span::styled(message.to_string(), Styles::error())));
        lines.push(Line::default());
    }

    for (index, field) in ConfigureField::ALL.iter().enumerate() {
        let focused = index == state.focus;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Styles::selected()
        } else {
            Styles::label()
        };

        let (value_text, value_style) = match state.current_value(*field) {
            Some(value) => (value, Styles::value()),
            None => field_hint(state, *field),
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<20}", field.label()), label_style),
            Span::styled(value_text, value_style),
        ]));
    }

    if !state.status_message.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            state.status_message.clone(),
            Styles::pending(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Configure Image ", Styles::title()));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Placeholder text and style for an unset field, derived from the backing
/// catalog status.
fn field_hint(state: &AppState, field: ConfigureField) -> (String, ratatui::style::Style) {
    let status = match field {
        ConfigureField::Os | ConfigureField::JavaDistribution => None,
        ConfigureField::CassandraMajor => Some(status_summary(&state.catalogs.majors)),
        ConfigureField::CassandraMinor => Some(status_summary(&state.catalogs.minors)),
        ConfigureField::JavaVersion => Some(status_summary(&state.catalogs.java)),
        ConfigureField::PythonVersion => Some(status_summary(&state.catalogs.python)),
    };

    match status {
        Some(StatusSummary::Loading) => ("Loading...".to_string(), Styles::pending()),
        // Failed dependent lists render as empty, not as errors
        Some(StatusSummary::Empty) => ("(none available)".to_string(), Styles::placeholder()),
        _ => {
            let hint = match field {
                ConfigureField::Os => "Select OS",
                ConfigureField::CassandraMajor => "Select Cassandra Version",
                ConfigureField::CassandraMinor => "Select Minor Version",
                ConfigureField::JavaDistribution => "Select Java Distribution",
                ConfigureField::JavaVersion => "Select Java Version",
                ConfigureField::PythonVersion => "Select Python Version",
            };
            (hint.to_string(), Styles::placeholder())
        }
    }
}

enum StatusSummary {
    Pending,
    Loading,
    Empty,
}

fn status_summary<T>(status: &CatalogStatus<Vec<T>>) -> StatusSummary {
    match status {
        CatalogStatus::Loading => StatusSummary::Loading,
        CatalogStatus::Ready(items) if items.is_empty() => StatusSummary::Empty,
        CatalogStatus::Failed(_) => StatusSummary::Empty,
        _ => StatusSummary::Pending,
    }
}

// ============================================================================
// Tools screen
// ============================================================================

fn render_tools(f: &mut Frame, state: &AppState, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for (index, tool) in ToolKind::iter().enumerate() {
        let focused = index == state.tools_focus;
        let marker = if focused { "> " } else { "  " };
        let checkbox = if state.selection.tools.is_enabled(tool) {
            "[x]"
        } else {
            "[ ]"
        };
        let style = if focused {
            Styles::selected()
        } else {
            Styles::value()
        };
        lines.push(Line::from(Span::styled(
            format!("{marker}{checkbox} {}", tool.label()),
            style,
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Select Additional Tools ", Styles::title()));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// Summary screen
// ============================================================================

fn render_summary(f: &mut Frame, state: &AppState, area: Rect) {
    let selection = &state.selection;
    let mut lines: Vec<Line> = Vec::new();

    let cassandra = selection
        .db_major
        .as_deref()
        .map(|major| compose_cassandra_version(major, selection.db_minor.as_deref()))
        .unwrap_or_default();

    let java = match (selection.java_distribution, selection.java_version.as_deref()) {
        (Some(dist), Some(version)) => format!("{} {}", dist.label(), version),
        _ => "None".to_string(),
    };

    let python = selection
        .python_version
        .as_deref()
        .map(|v| format!("Python {v}"))
        .unwrap_or_else(|| "None".to_string());

    let selected_tools = {
        let labels: Vec<&str> = ToolKind::iter()
            .filter(|t| selection.tools.is_enabled(*t))
            .map(|t| t.label())
            .collect();
        if labels.is_empty() {
            "None".to_string()
        } else {
            labels.join(", ")
        }
    };

    let os = selection
        .os
        .map(|os| os.to_string())
        .unwrap_or_default();

    for (label, value) in [
        ("OS", os),
        ("Cassandra", cassandra),
        ("Java", java),
        ("Python", python),
        ("Other required tools", REQUIRED_TOOLS.join(", ")),
        ("Selected Tools", selected_tools),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), Styles::label()),
            Span::styled(value, Styles::value()),
        ]));
    }

    lines.push(Line::default());
    if state.build_in_flight {
        lines.push(Line::from(Span::styled(
            "Submitting build request...",
            Styles::pending(),
        )));
    } else if let Some(result) = &state.build_result {
        if result.is_success() {
            let ami_id = result.ami_id.as_deref().unwrap_or_default();
            lines.push(Line::from(Span::styled(
                format!("AMI created! AMI ID: {ami_id}"),
                Styles::success(),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("AMI creation failed: {}", result.diagnostic()),
                Styles::error(),
            )));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Final Configuration ", Styles::title()));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// Option picker popup
// ============================================================================

/// Render the option picker centered over the current screen.
pub fn render_picker(f: &mut Frame, state: &AppState) {
    let Some(picker) = &state.picker else {
        return;
    };

    let area = centered_rect(50, 60, f.area());
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = picker
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let style = if index == picker.selected {
                Styles::selected()
            } else {
                Styles::value()
            };
            ListItem::new(Span::styled(
                format!(
                    "{} {}",
                    if index == picker.selected { ">" } else { " " },
                    item.label
                ),
                style,
            ))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .style(ratatui::style::Style::default().bg(Colors::BG_PRIMARY))
        .title(Span::styled(
            format!(" {} ", picker.field.label()),
            Styles::title(),
        ));
    f.render_widget(List::new(items).block(block), area);
}

/// Compute a centered rectangle covering the given percentages of `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
