//! Application state definitions
//!
//! Contains all state-related types for the application: `AppState`, the
//! per-category catalog set, the option-picker state, and the message types
//! exchanged with fetch worker threads. All mutation entry points live here
//! so they are testable without a terminal.

use log::{debug, warn};
use std::str::FromStr;
use strum::IntoEnumIterator;

use crate::catalog::{CassandraRelease, CatalogStatus};
use crate::dispatch::BuildResponse;
use crate::selection::{reduce, SelectionAction, WizardSelection, WizardStep};
use crate::types::{JavaDistribution, OperatingSystem, ToolKind};

/// Persistent error shown when the primary majors fetch fails.
///
/// Dependent-list failures are deliberately not surfaced; this is the only
/// catalog failure with a user-visible message.
pub const MAJORS_FETCH_ERROR: &str = "Failed to fetch Cassandra versions";

/// The six fields of the configure screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigureField {
    Os,
    CassandraMajor,
    CassandraMinor,
    JavaDistribution,
    JavaVersion,
    PythonVersion,
}

impl ConfigureField {
    pub const ALL: [Self; 6] = [
        Self::Os,
        Self::CassandraMajor,
        Self::CassandraMinor,
        Self::JavaDistribution,
        Self::JavaVersion,
        Self::PythonVersion,
    ];

    /// Field label on the configure screen.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Os => "Operating System",
            Self::CassandraMajor => "Cassandra Version",
            Self::CassandraMinor => "Minor Version",
            Self::JavaDistribution => "Java Distribution",
            Self::JavaVersion => "Java Version",
            Self::PythonVersion => "Python Version",
        }
    }
}

/// One selectable entry in the option picker.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerItem {
    /// Text shown in the popup.
    pub label: String,
    /// Value applied to the selection when confirmed.
    pub value: String,
}

/// State of the option-picker popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerState {
    /// Field the picker was opened for.
    pub field: ConfigureField,
    pub items: Vec<PickerItem>,
    pub selected: usize,
}

impl PickerState {
    /// Move selection up.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    /// Currently highlighted item.
    pub fn current(&self) -> Option<&PickerItem> {
        self.items.get(self.selected)
    }
}

/// Per-category fetch status for everything the wizard offers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogSet {
    pub majors: CatalogStatus<Vec<CassandraRelease>>,
    pub minors: CatalogStatus<Vec<String>>,
    pub java: CatalogStatus<Vec<String>>,
    pub python: CatalogStatus<Vec<String>>,
}

/// Messages sent from fetch worker threads to the main UI thread.
///
/// Scoped categories carry the generation counter current when the fetch was
/// issued; results whose generation no longer matches are discarded on
/// arrival.
#[derive(Debug)]
pub enum CatalogMessage {
    Majors(Result<Vec<CassandraRelease>, String>),
    Minors {
        generation: u64,
        result: Result<Vec<String>, String>,
    },
    Java {
        generation: u64,
        result: Result<Vec<String>, String>,
    },
    Python {
        generation: u64,
        result: Result<Vec<String>, String>,
    },
    Build(BuildResponse),
}

/// Fetch work a selection change asks the app shell to start.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Minors { major: String, generation: u64 },
    Java { major: String, generation: u64 },
    Python { generation: u64 },
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current wizard step
    pub step: WizardStep,
    /// The in-progress selection
    pub selection: WizardSelection,
    /// Per-category catalog fetch state
    pub catalogs: CatalogSet,
    /// Scope generation; bumped whenever the Cassandra major changes
    pub generation: u64,
    /// Focused field index on the configure screen
    pub focus: usize,
    /// Focused tool index on the tools screen
    pub tools_focus: usize,
    /// Option picker popup, when open
    pub picker: Option<PickerState>,
    /// Status message for user feedback
    pub status_message: String,
    /// Result of the most recent build submission
    pub build_result: Option<BuildResponse>,
    /// Whether a build submission is in flight (display only; resubmission
    /// is not blocked)
    pub build_in_flight: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            step: WizardStep::Configure,
            selection: WizardSelection::default(),
            catalogs: CatalogSet::default(),
            generation: 0,
            focus: 0,
            tools_focus: 0,
            picker: None,
            status_message: "Welcome to the Cassandra AMI configurator".to_string(),
            build_result: None,
            build_in_flight: false,
        }
    }
}

impl AppState {
    /// Field currently focused on the configure screen.
    pub fn focused_field(&self) -> ConfigureField {
        ConfigureField::ALL[self.focus % ConfigureField::ALL.len()]
    }

    /// Move configure focus up, wrapping.
    pub fn focus_previous(&mut self) {
        let len = ConfigureField::ALL.len();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Move configure focus down, wrapping.
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % ConfigureField::ALL.len();
    }

    /// Apply a selection action through the pure reducer and report which
    /// catalog fetches the change requires.
    ///
    /// Changing the Cassandra major bumps the scope generation so responses
    /// for the old scope are discarded on arrival.
    pub fn apply_action(&mut self, action: SelectionAction) -> Vec<FetchRequest> {
        let mut fetches = Vec::new();
        match &action {
            SelectionAction::SetDbMajor(major) => {
                self.generation += 1;
                self.catalogs.minors = CatalogStatus::Loading;
                self.catalogs.java = CatalogStatus::Idle;
                self.catalogs.python = CatalogStatus::Loading;
                fetches.push(FetchRequest::Minors {
                    major: major.clone(),
                    generation: self.generation,
                });
                fetches.push(FetchRequest::Python {
                    generation: self.generation,
                });
            }
            SelectionAction::SetJavaDistribution(_) => {
                if let Some(major) = self.selection.db_major.clone() {
                    self.catalogs.java = CatalogStatus::Loading;
                    fetches.push(FetchRequest::Java {
                        major,
                        generation: self.generation,
                    });
                }
            }
            _ => {}
        }
        self.selection = reduce(&self.selection, action);
        fetches
    }

    /// Apply a worker-thread message to state.
    ///
    /// Scoped results carrying an outdated generation are dropped untouched.
    /// Only the majors failure gets a user-visible message; dependent-list
    /// failures are recorded and logged but stay silent.
    pub fn apply_catalog_message(&mut self, message: CatalogMessage) {
        match message {
            CatalogMessage::Majors(result) => {
                self.catalogs.majors = match result {
                    Ok(data) => CatalogStatus::Ready(data),
                    Err(reason) => {
                        warn!("Cassandra majors fetch failed: {reason}");
                        CatalogStatus::Failed(MAJORS_FETCH_ERROR.to_string())
                    }
                };
            }
            CatalogMessage::Minors { generation, result } => {
                if generation != self.generation {
                    debug!("discarding stale minors result (generation {generation})");
                    return;
                }
                self.catalogs.minors = Self::silent_status("minors", result);
            }
            CatalogMessage::Java { generation, result } => {
                if generation != self.generation {
                    debug!("discarding stale Java result (generation {generation})");
                    return;
                }
                self.catalogs.java = Self::silent_status("Java", result);
            }
            CatalogMessage::Python { generation, result } => {
                if generation != self.generation {
                    debug!("discarding stale Python result (generation {generation})");
                    return;
                }
                self.catalogs.python = Self::silent_status("Python", result);
            }
            CatalogMessage::Build(response) => {
                self.build_in_flight = false;
                self.build_result = Some(response);
            }
        }
    }

    fn silent_status(category: &str, result: Result<Vec<String>, String>) -> CatalogStatus<Vec<String>> {
        match result {
            Ok(data) => CatalogStatus::Ready(data),
            Err(reason) => {
                warn!("{category} fetch failed: {reason}");
                CatalogStatus::Failed(reason)
            }
        }
    }

    /// Open the option picker for the focused configure field.
    ///
    /// Does nothing (beyond a status hint) while the backing catalog is
    /// loading, failed, or empty.
    pub fn open_picker(&mut self) {
        let field = self.focused_field();
        let items = match self.picker_items(field) {
            Some(items) if !items.is_empty() => items,
            _ => {
                self.status_message = format!("No options available for {}", field.label());
                return;
            }
        };

        // Pre-highlight the current value if it is still in the list
        let current = self.current_value(field);
        let selected = current
            .and_then(|value| items.iter().position(|item| item.value == value))
            .unwrap_or(0);

        self.picker = Some(PickerState {
            field,
            items,
            selected,
        });
    }

    /// Close the picker without applying anything.
    pub fn close_picker(&mut self) {
        self.picker = None;
    }

    /// Confirm the highlighted picker entry, returning the selection action
    /// it stands for.
    pub fn confirm_picker(&mut self) -> Option<SelectionAction> {
        let picker = self.picker.take()?;
        let item = picker.items.get(picker.selected)?;
        let value = item.value.clone();
        match picker.field {
            ConfigureField::Os => OperatingSystem::from_str(&value)
                .ok()
                .map(SelectionAction::SetOs),
            ConfigureField::CassandraMajor => Some(SelectionAction::SetDbMajor(value)),
            ConfigureField::CassandraMinor => Some(SelectionAction::SetDbMinor(value)),
            ConfigureField::JavaDistribution => JavaDistribution::from_str(&value)
                .ok()
                .map(SelectionAction::SetJavaDistribution),
            ConfigureField::JavaVersion => Some(SelectionAction::SetJavaVersion(value)),
            ConfigureField::PythonVersion => Some(SelectionAction::SetPythonVersion(value)),
        }
    }

    /// Picker entries for a field, from the fixed enums or the fetched
    /// catalogs.
    fn picker_items(&self, field: ConfigureField) -> Option<Vec<PickerItem>> {
        match field {
            ConfigureField::Os => Some(
                OperatingSystem::iter()
                    .map(|os| PickerItem {
                        label: format!("{} — {}", os.family(), os),
                        value: os.to_string(),
                    })
                    .collect(),
            ),
            ConfigureField::CassandraMajor => self.catalogs.majors.ready().map(|majors| {
                majors
                    .iter()
                    .map(|release| PickerItem {
                        label: release.display_line(),
                        value: release.cycle.clone(),
                    })
                    .collect()
            }),
            ConfigureField::CassandraMinor => self.catalogs.minors.ready().map(|minors| {
                minors
                    .iter()
                    .map(|minor| PickerItem {
                        label: minor.clone(),
                        value: minor.clone(),
                    })
                    .collect()
            }),
            ConfigureField::JavaDistribution => {
                // Only offered once a major is chosen, like the rest of the chain
                self.selection.db_major.as_ref()?;
                Some(
                    JavaDistribution::iter()
                        .map(|dist| PickerItem {
                            label: dist.label().to_string(),
                            value: dist.to_string(),
                        })
                        .collect(),
                )
            }
            ConfigureField::JavaVersion => self.catalogs.java.ready().map(|versions| {
                versions
                    .iter()
                    .map(|v| PickerItem {
                        label: format!("Java {v}"),
                        value: v.clone(),
                    })
                    .collect()
            }),
            ConfigureField::PythonVersion => self.catalogs.python.ready().map(|versions| {
                versions
                    .iter()
                    .map(|v| PickerItem {
                        label: format!("Python {v}"),
                        value: v.clone(),
                    })
                    .collect()
            }),
        }
    }

    /// Current selection value for a configure field, as a picker value.
    pub fn current_value(&self, field: ConfigureField) -> Option<String> {
        match field {
            ConfigureField::Os => self.selection.os.map(|os| os.to_string()),
            ConfigureField::CassandraMajor => self.selection.db_major.clone(),
            ConfigureField::CassandraMinor => self.selection.db_minor.clone(),
            ConfigureField::JavaDistribution => {
                self.selection.java_distribution.map(|d| d.to_string())
            }
            ConfigureField::JavaVersion => self.selection.java_version.clone(),
            ConfigureField::PythonVersion => self.selection.python_version.clone(),
        }
    }

    /// Move to the next wizard step if the guard allows it.
    pub fn advance_step(&mut self) {
        if !self.step.can_advance(&self.selection) {
            if self.step == WizardStep::Configure {
                self.status_message = "Complete all fields before continuing".to_string();
            }
            return;
        }
        if let Some(next) = self.step.next() {
            self.step = next;
            self.status_message.clear();
        }
    }

    /// Move to the previous wizard step.
    pub fn retreat_step(&mut self) {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
            self.status_message.clear();
        }
    }

    /// Toggle the tool currently focused on the tools screen.
    pub fn toggle_focused_tool(&mut self) {
        let tools: Vec<ToolKind> = ToolKind::iter().collect();
        if let Some(tool) = tools.get(self.tools_focus) {
            self.selection = reduce(&self.selection, SelectionAction::ToggleTool(*tool));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.step, WizardStep::Configure);
        assert_eq!(state.generation, 0);
        assert!(state.picker.is_none());
        assert!(state.build_result.is_none());
        assert!(!state.build_in_flight);
        assert!(state.status_message.contains("Welcome"));
    }

    #[test]
    fn test_focus_wraps_both_directions() {
        let mut state = AppState::default();
        assert_eq!(state.focused_field(), ConfigureField::Os);

        state.focus_previous();
        assert_eq!(state.focused_field(), ConfigureField::PythonVersion);

        state.focus_next();
        assert_eq!(state.focused_field(), ConfigureField::Os);
    }

    #[test]
    fn test_set_db_major_requests_scoped_fetches() {
        let mut state = AppState::default();
        let fetches = state.apply_action(SelectionAction::SetDbMajor("4.1".to_string()));

        assert_eq!(state.generation, 1);
        assert!(state.catalogs.minors.is_loading());
        assert!(state.catalogs.python.is_loading());
        assert_eq!(state.catalogs.java, CatalogStatus::Idle);
        assert_eq!(
            fetches,
            vec![
                FetchRequest::Minors {
                    major: "4.1".to_string(),
                    generation: 1
                },
                FetchRequest::Python { generation: 1 },
            ]
        );
    }

    #[test]
    fn test_java_fetch_requires_major() {
        let mut state = AppState::default();
        let fetches =
            state.apply_action(SelectionAction::SetJavaDistribution(JavaDistribution::Zulu));
        assert!(fetches.is_empty());

        state.apply_action(SelectionAction::SetDbMajor("5.0".to_string()));
        let fetches =
            state.apply_action(SelectionAction::SetJavaDistribution(JavaDistribution::Zulu));
        assert_eq!(
            fetches,
            vec![FetchRequest::Java {
                major: "5.0".to_string(),
                generation: 1
            }]
        );
        assert!(state.catalogs.java.is_loading());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut state = AppState::default();
        state.apply_action(SelectionAction::SetDbMajor("4.1".to_string()));
        // Scope changes again before the first fetch lands
        state.apply_action(SelectionAction::SetDbMajor("5.0".to_string()));
        assert_eq!(state.generation, 2);

        state.apply_catalog_message(CatalogMessage::Minors {
            generation: 1,
            result: Ok(vec!["4.1.3".to_string()]),
        });
        // The stale result must not overwrite the loading state
        assert!(state.catalogs.minors.is_loading());

        state.apply_catalog_message(CatalogMessage::Minors {
            generation: 2,
            result: Ok(vec!["5.0.2".to_string()]),
        });
        assert_eq!(
            state.catalogs.minors.ready(),
            Some(&vec!["5.0.2".to_string()])
        );
    }

    #[test]
    fn test_majors_failure_gets_visible_message() {
        let mut state = AppState::default();
        state.apply_catalog_message(CatalogMessage::Majors(Err("connection reset".to_string())));
        assert_eq!(state.catalogs.majors.failure(), Some(MAJORS_FETCH_ERROR));
    }

    #[test]
    fn test_dependent_failure_keeps_reason_silently() {
        let mut state = AppState::default();
        state.apply_action(SelectionAction::SetDbMajor("4.1".to_string()));
        state.apply_catalog_message(CatalogMessage::Python {
            generation: 1,
            result: Err("503".to_string()),
        });
        // Reason retained in state for logging, not shown as the majors error
        assert_eq!(state.catalogs.python.failure(), Some("503"));
    }

    #[test]
    fn test_build_message_records_result() {
        let mut state = AppState::default();
        state.build_in_flight = true;
        state.apply_catalog_message(CatalogMessage::Build(BuildResponse {
            status: "success".to_string(),
            ami_id: Some("ami-0abc1234def567890".to_string()),
            output: None,
        }));
        assert!(!state.build_in_flight);
        assert!(state.build_result.as_ref().unwrap().is_success());
    }

    #[test]
    fn test_picker_unavailable_while_loading() {
        let mut state = AppState::default();
        state.focus = 1; // Cassandra Version
        state.catalogs.majors = CatalogStatus::Loading;
        state.open_picker();
        assert!(state.picker.is_none());
        assert!(state.status_message.contains("No options available"));
    }

    #[test]
    fn test_picker_confirm_produces_action() {
        let mut state = AppState::default();
        state.focus = 1;
        state.catalogs.majors = CatalogStatus::Ready(vec![CassandraRelease {
            cycle: "4.1".to_string(),
            release_date: "2022-12-13".to_string(),
            eol: crate::catalog::EolStatus::Flag(false),
            prerelease: false,
        }]);
        state.open_picker();
        assert!(state.picker.is_some());

        let action = state.confirm_picker().unwrap();
        assert_eq!(action, SelectionAction::SetDbMajor("4.1".to_string()));
        assert!(state.picker.is_none());
    }

    #[test]
    fn test_picker_highlights_current_value() {
        let mut state = AppState::default();
        state.focus = 2; // Minor Version
        state.catalogs.minors = CatalogStatus::Ready(vec![
            "4.1.2".to_string(),
            "4.1.9".to_string(),
            "4.1.10".to_string(),
        ]);
        state.selection.db_minor = Some("4.1.9".to_string());
        state.open_picker();
        assert_eq!(state.picker.as_ref().unwrap().selected, 1);
    }

    #[test]
    fn test_advance_blocked_until_complete() {
        let mut state = AppState::default();
        state.advance_step();
        assert_eq!(state.step, WizardStep::Configure);
        assert!(state.status_message.contains("Complete all fields"));

        state.selection = WizardSelection {
            os: Some(OperatingSystem::Ubuntu2204),
            db_major: Some("4.1".to_string()),
            db_minor: Some("4.1.3".to_string()),
            java_distribution: Some(JavaDistribution::Corretto),
            java_version: Some("11".to_string()),
            python_version: Some("3.11".to_string()),
            ..WizardSelection::default()
        };
        state.advance_step();
        assert_eq!(state.step, WizardStep::Tools);

        state.advance_step();
        assert_eq!(state.step, WizardStep::Summary);

        state.retreat_step();
        assert_eq!(state.step, WizardStep::Tools);
    }

    #[test]
    fn test_toggle_focused_tool() {
        let mut state = AppState::default();
        state.tools_focus = 0;
        state.toggle_focused_tool();
        assert!(state.selection.tools.backup);

        state.tools_focus = 1;
        state.toggle_focused_tool();
        assert!(state.selection.tools.repairs);
    }
}
