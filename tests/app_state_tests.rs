//! Tests for Application State Management
//!
//! These tests verify:
//! - AppState default initialization
//! - The selection dependency chain driven through apply_action
//! - Stale-response discarding via the generation counter
//! - The guarded wizard step flow end to end

use amitui::app::{AppState, CatalogMessage, ConfigureField, FetchRequest};
use amitui::catalog::{CassandraRelease, CatalogStatus, EolStatus};
use amitui::dispatch::BuildResponse;
use amitui::payload::ImageConfig;
use amitui::selection::{SelectionAction, WizardStep};
use amitui::types::{JavaDistribution, OperatingSystem};

fn release(cycle: &str) -> CassandraRelease {
    CassandraRelease {
        cycle: cycle.to_string(),
        release_date: "2022-12-13".to_string(),
        eol: EolStatus::Flag(false),
        prerelease: false,
    }
}

// =============================================================================
// AppState Default Tests
// =============================================================================

#[test]
fn test_app_state_default_step_is_configure() {
    let state = AppState::default();
    assert_eq!(state.step, WizardStep::Configure);
}

#[test]
fn test_app_state_default_has_welcome_message() {
    let state = AppState::default();
    assert!(state.status_message.contains("Welcome"));
}

#[test]
fn test_app_state_default_catalogs_are_idle() {
    let state = AppState::default();
    assert_eq!(state.catalogs.majors, CatalogStatus::Idle);
    assert_eq!(state.catalogs.minors, CatalogStatus::Idle);
    assert_eq!(state.catalogs.java, CatalogStatus::Idle);
    assert_eq!(state.catalogs.python, CatalogStatus::Idle);
}

#[test]
fn test_app_state_default_focus_is_os_field() {
    let state = AppState::default();
    assert_eq!(state.focused_field(), ConfigureField::Os);
}

#[test]
fn test_app_state_default_no_build_activity() {
    let state = AppState::default();
    assert!(state.build_result.is_none());
    assert!(!state.build_in_flight);
}

// =============================================================================
// Dependency Chain Tests
// =============================================================================

#[test]
fn test_major_change_resets_downstream_and_refetches() {
    let mut state = AppState::default();
    state.apply_action(SelectionAction::SetOs(OperatingSystem::Ubuntu2204));
    state.apply_action(SelectionAction::SetDbMajor("4.1".to_string()));
    state.apply_catalog_message(CatalogMessage::Minors {
        generation: 1,
        result: Ok(vec!["4.1.3".to_string()]),
    });
    state.apply_action(SelectionAction::SetDbMinor("4.1.3".to_string()));
    state.apply_action(SelectionAction::SetJavaDistribution(
        JavaDistribution::Corretto,
    ));
    state.apply_action(SelectionAction::SetJavaVersion("11".to_string()));
    state.apply_action(SelectionAction::SetPythonVersion("3.11".to_string()));

    // Switching the major clears everything downstream, regardless of value
    let fetches = state.apply_action(SelectionAction::SetDbMajor("5.0".to_string()));

    assert_eq!(state.selection.db_major.as_deref(), Some("5.0"));
    assert!(state.selection.db_minor.is_none());
    assert!(state.selection.java_distribution.is_none());
    assert!(state.selection.java_version.is_none());
    assert!(state.selection.python_version.is_none());
    // The OS survives; it is not downstream of the major
    assert_eq!(state.selection.os, Some(OperatingSystem::Ubuntu2204));

    assert_eq!(
        fetches,
        vec![
            FetchRequest::Minors {
                major: "5.0".to_string(),
                generation: 2
            },
            FetchRequest::Python { generation: 2 },
        ]
    );
}

#[test]
fn test_distribution_change_clears_java_version_only() {
    let mut state = AppState::default();
    state.apply_action(SelectionAction::SetDbMajor("4.1".to_string()));
    state.apply_action(SelectionAction::SetJavaDistribution(JavaDistribution::Zulu));
    state.apply_action(SelectionAction::SetJavaVersion("8".to_string()));
    state.apply_action(SelectionAction::SetPythonVersion("3.11".to_string()));

    let fetches = state.apply_action(SelectionAction::SetJavaDistribution(
        JavaDistribution::Temurin,
    ));

    assert!(state.selection.java_version.is_none());
    assert_eq!(state.selection.python_version.as_deref(), Some("3.11"));
    // Same generation: the distribution does not change the fetch scope
    assert_eq!(
        fetches,
        vec![FetchRequest::Java {
            major: "4.1".to_string(),
            generation: 1
        }]
    );
}

// =============================================================================
// Stale Response Tests
// =============================================================================

#[test]
fn test_stale_minors_response_is_dropped() {
    let mut state = AppState::default();
    state.apply_action(SelectionAction::SetDbMajor("4.1".to_string()));
    state.apply_action(SelectionAction::SetDbMajor("5.0".to_string()));

    // The 4.1 fetch lands after the scope moved to 5.0
    state.apply_catalog_message(CatalogMessage::Minors {
        generation: 1,
        result: Ok(vec!["4.1.2".to_string(), "4.1.3".to_string()]),
    });
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
fn test_stale_failure_is_also_dropped() {
    let mut state = AppState::default();
    state.apply_action(SelectionAction::SetDbMajor("4.1".to_string()));
    state.apply_action(SelectionAction::SetDbMajor("5.0".to_string()));

    state.apply_catalog_message(CatalogMessage::Java {
        generation: 1,
        result: Err("timed out".to_string()),
    });
    // The stale failure must not mark the current scope as failed
    assert!(state.catalogs.java.failure().is_none());
}

// =============================================================================
// Failure Surfacing Tests
// =============================================================================

#[test]
fn test_majors_failure_is_the_only_visible_one() {
    let mut state = AppState::default();
    state.apply_catalog_message(CatalogMessage::Majors(Err("dns failure".to_string())));
    // The stored message is the user-facing one, not the transport detail
    assert_eq!(
        state.catalogs.majors.failure(),
        Some("Failed to fetch Cassandra versions")
    );

    state.apply_action(SelectionAction::SetDbMajor("4.1".to_string()));
    state.apply_catalog_message(CatalogMessage::Minors {
        generation: 1,
        result: Err("dns failure".to_string()),
    });
    // Dependent failures keep the raw reason; the UI renders them as empty
    assert_eq!(state.catalogs.minors.failure(), Some("dns failure"));
}

#[test]
fn test_wizard_stays_usable_after_failures() {
    let mut state = AppState::default();
    state.apply_catalog_message(CatalogMessage::Majors(Err("down".to_string())));

    // A later retry can still succeed and populate the list
    state.apply_catalog_message(CatalogMessage::Majors(Ok(vec![release("4.1")])));
    assert!(state.catalogs.majors.ready().is_some());
}

// =============================================================================
// Full Wizard Flow
// =============================================================================

#[test]
fn test_complete_wizard_flow_to_build() {
    let mut state = AppState::default();

    state.apply_catalog_message(CatalogMessage::Majors(Ok(vec![
        release("4.1"),
        release("5.0"),
    ])));

    state.apply_action(SelectionAction::SetOs(OperatingSystem::Ubuntu2204));
    state.apply_action(SelectionAction::SetDbMajor("4.1".to_string()));
    state.apply_catalog_message(CatalogMessage::Minors {
        generation: 1,
        result: Ok(vec!["4.1.2".to_string(), "4.1.3".to_string()]),
    });
    state.apply_catalog_message(CatalogMessage::Python {
        generation: 1,
        result: Ok(vec!["3.11".to_string(), "3.12".to_string()]),
    });
    state.apply_action(SelectionAction::SetDbMinor("4.1.3".to_string()));
    state.apply_action(SelectionAction::SetJavaDistribution(
        JavaDistribution::Corretto,
    ));
    state.apply_catalog_message(CatalogMessage::Java {
        generation: 1,
        result: Ok(vec!["8".to_string(), "11".to_string()]),
    });
    state.apply_action(SelectionAction::SetJavaVersion("11".to_string()));

    // Guard holds until the last required field is set
    state.advance_step();
    assert_eq!(state.step, WizardStep::Configure);

    state.apply_action(SelectionAction::SetPythonVersion("3.11".to_string()));
    state.advance_step();
    assert_eq!(state.step, WizardStep::Tools);

    state.toggle_focused_tool();
    state.advance_step();
    assert_eq!(state.step, WizardStep::Summary);

    let config = ImageConfig::from_selection(&state.selection).unwrap();
    assert_eq!(config.cassandra_version, "4.1.3");
    assert_eq!(config.tools, vec!["backup"]);

    // Build result arrives as a message
    state.build_in_flight = true;
    state.apply_catalog_message(CatalogMessage::Build(BuildResponse {
        status: "success".to_string(),
        ami_id: Some("ami-0abc1234def567890".to_string()),
        output: None,
    }));
    assert!(!state.build_in_flight);
    assert!(state.build_result.as_ref().unwrap().is_success());

    // No terminal state: the wizard can be revisited
    state.retreat_step();
    assert_eq!(state.step, WizardStep::Tools);
}

#[test]
fn test_summary_allows_repeated_submission() {
    let mut state = AppState::default();
    state.build_in_flight = true;
    state.apply_catalog_message(CatalogMessage::Build(BuildResponse {
        status: "error".to_string(),
        ami_id: None,
        output: Some("packer build failed".to_string()),
    }));
    assert_eq!(
        state.build_result.as_ref().unwrap().diagnostic(),
        "packer build failed"
    );

    // A second submission simply overwrites the previous result
    state.build_in_flight = true;
    state.apply_catalog_message(CatalogMessage::Build(BuildResponse {
        status: "success".to_string(),
        ami_id: Some("ami-00000000deadbeef".to_string()),
        output: None,
    }));
    assert!(state.build_result.as_ref().unwrap().is_success());
}
