//! Selection state machine
//!
//! The wizard's in-progress choices live in an immutable `WizardSelection`
//! value transformed by the pure `reduce` function, so every transition is
//! unit-testable without a rendering layer.
//!
//! # Dependency chain
//!
//! ```text
//! OS    Cassandra major -> Cassandra minor
//!       Cassandra major -> Java distribution -> Java version
//!       Cassandra major -> Python version
//! ```
//!
//! Changing an upstream field forcibly clears everything downstream of it.

use crate::types::{JavaDistribution, OperatingSystem, ToolKind};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Enabled flags for the optional tool list.
///
/// `enabled_keys` yields wire keys in declaration order of [`ToolKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolSelection {
    pub backup: bool,
    pub repairs: bool,
}

impl ToolSelection {
    /// Whether a tool is currently enabled.
    pub fn is_enabled(&self, tool: ToolKind) -> bool {
        match tool {
            ToolKind::Backup => self.backup,
            ToolKind::Repairs => self.repairs,
        }
    }

    /// Flip one tool's enabled flag.
    pub fn toggle(&mut self, tool: ToolKind) {
        match tool {
            ToolKind::Backup => self.backup = !self.backup,
            ToolKind::Repairs => self.repairs = !self.repairs,
        }
    }

    /// Wire keys of the enabled tools, in declaration order.
    pub fn enabled_keys(&self) -> Vec<String> {
        ToolKind::iter()
            .filter(|t| self.is_enabled(*t))
            .map(|t| t.to_string())
            .collect()
    }
}

/// The wizard's aggregate selection state.
///
/// Created empty at session start; read-only once handed to the assembler;
/// never persisted beyond the session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WizardSelection {
    pub os: Option<OperatingSystem>,
    pub db_major: Option<String>,
    pub db_minor: Option<String>,
    pub java_distribution: Option<JavaDistribution>,
    pub java_version: Option<String>,
    pub python_version: Option<String>,
    pub tools: ToolSelection,
}

impl WizardSelection {
    /// True when all six required fields are populated.
    ///
    /// This is the guard for advancing past the configure step.
    pub fn is_complete(&self) -> bool {
        self.os.is_some()
            && self.db_major.is_some()
            && self.db_minor.is_some()
            && self.java_distribution.is_some()
            && self.java_version.is_some()
            && self.python_version.is_some()
    }
}

/// One user-driven mutation of the selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionAction {
    SetOs(OperatingSystem),
    SetDbMajor(String),
    SetDbMinor(String),
    SetJavaDistribution(JavaDistribution),
    SetJavaVersion(String),
    SetPythonVersion(String),
    ToggleTool(ToolKind),
}

/// Pure reducer: apply one action to a selection, producing the next one.
///
/// Cascade rules:
/// - `SetDbMajor` clears the minor, Java distribution, Java version, and
///   Python version, regardless of their prior values.
/// - `SetJavaDistribution` clears the Java version.
pub fn reduce(selection: &WizardSelection, action: SelectionAction) -> WizardSelection {
    let mut next = selection.clone();
    match action {
        SelectionAction::SetOs(os) => {
            next.os = Some(os);
        }
        SelectionAction::SetDbMajor(major) => {
            next.db_major = Some(major);
            next.db_minor = None;
            next.java_distribution = None;
            next.java_version = None;
            next.python_version = None;
        }
        SelectionAction::SetDbMinor(minor) => {
            next.db_minor = Some(minor);
        }
        SelectionAction::SetJavaDistribution(dist) => {
            next.java_distribution = Some(dist);
            next.java_version = None;
        }
        SelectionAction::SetJavaVersion(version) => {
            next.java_version = Some(version);
        }
        SelectionAction::SetPythonVersion(version) => {
            next.python_version = Some(version);
        }
        SelectionAction::ToggleTool(tool) => {
            next.tools.toggle(tool);
        }
    }
    next
}

// ============================================================================
// Wizard step machine
// ============================================================================

/// The three wizard screens.
///
/// # State Transitions
///
/// ```text
/// Configure <-> Tools <-> Summary
/// ```
///
/// # Invariants
///
/// - `Configure -> Tools` requires a complete selection (guard, not error)
/// - `Tools <-> Summary` are unconditional
/// - No terminal state: the wizard can be revisited indefinitely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    /// Version and platform selection.
    #[default]
    Configure,
    /// Optional tool selection.
    Tools,
    /// Final review and build trigger.
    Summary,
}

impl WizardStep {
    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 3;

    /// Get the next step in the wizard sequence.
    ///
    /// Returns `None` at the final step. Advancing out of `Configure` is
    /// additionally guarded by [`WizardStep::can_advance`].
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Configure => Some(Self::Tools),
            Self::Tools => Some(Self::Summary),
            Self::Summary => None,
        }
    }

    /// Get the previous step in the wizard sequence.
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Configure => None,
            Self::Tools => Some(Self::Configure),
            Self::Summary => Some(Self::Tools),
        }
    }

    /// Whether advancing from this step is currently allowed.
    ///
    /// Leaving `Configure` requires every required field; the other
    /// transitions are unconditional.
    pub fn can_advance(&self, selection: &WizardSelection) -> bool {
        match self {
            Self::Configure => selection.is_complete(),
            Self::Tools => true,
            Self::Summary => false,
        }
    }

    /// Display title for this step.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Configure => "Configure Image",
            Self::Tools => "Select Additional Tools",
            Self::Summary => "Final Configuration",
        }
    }

    /// Step number (1-indexed for display).
    pub fn step_number(&self) -> usize {
        match self {
            Self::Configure => 1,
            Self::Tools => 2,
            Self::Summary => 3,
        }
    }
}
