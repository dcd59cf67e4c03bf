//! Build payload assembly and headless config file handling.
//!
//! `ImageConfig` is the canonical payload the build service accepts. It is
//! assembled from a completed wizard selection, and doubles as the on-disk
//! JSON format for the headless `build --config` and `validate` commands.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{AmiTuiError, Result};
use crate::selection::WizardSelection;
use crate::types::{JavaDistribution, OperatingSystem};

/// Canonical build request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    pub os: String,
    pub cassandra_version: String,
    pub java_distribution: String,
    pub java_version: String,
    pub python_version: String,
    pub tools: Vec<String>,
}

impl ImageConfig {
    /// Assemble the payload from a completed selection.
    ///
    /// The Cassandra version is the major line plus the patch component of
    /// the chosen minor: major `"4.1"` with minor `"4.1.3"` yields `"4.1.3"`.
    /// Returns a validation error when a required field is missing; the
    /// wizard guard prevents that path in the TUI.
    pub fn from_selection(selection: &WizardSelection) -> Result<Self> {
        let os = selection
            .os
            .ok_or_else(|| AmiTuiError::validation("operating system is required"))?;
        let major = selection
            .db_major
            .as_deref()
            .ok_or_else(|| AmiTuiError::validation("Cassandra version is required"))?;
        let minor = selection
            .db_minor
            .as_deref()
            .ok_or_else(|| AmiTuiError::validation("Cassandra minor version is required"))?;
        let distribution = selection
            .java_distribution
            .ok_or_else(|| AmiTuiError::validation("Java distribution is required"))?;
        let java_version = selection
            .java_version
            .as_deref()
            .ok_or_else(|| AmiTuiError::validation("Java version is required"))?;
        let python_version = selection
            .python_version
            .as_deref()
            .ok_or_else(|| AmiTuiError::validation("Python version is required"))?;

        Ok(Self {
            os: os.to_string(),
            cassandra_version: compose_cassandra_version(major, Some(minor)),
            java_distribution: distribution.to_string(),
            java_version: java_version.to_string(),
            python_version: python_version.to_string(),
            tools: selection.tools.enabled_keys(),
        })
    }

    /// Save the payload to a JSON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load a payload from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate a payload loaded from disk.
    ///
    /// Checks what the wizard guard would have guaranteed: every required
    /// field non-empty, and the OS and Java distribution among the known
    /// options.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.os.trim().is_empty() {
            anyhow::bail!("Operating system must be specified");
        }
        if OperatingSystem::from_str(&self.os).is_err() {
            anyhow::bail!("Unknown operating system: {}", self.os);
        }
        if self.cassandra_version.trim().is_empty() {
            anyhow::bail!("Cassandra version must be specified");
        }
        if self.java_distribution.trim().is_empty() {
            anyhow::bail!("Java distribution must be specified");
        }
        if JavaDistribution::from_str(&self.java_distribution).is_err() {
            anyhow::bail!("Unknown Java distribution: {}", self.java_distribution);
        }
        if self.java_version.trim().is_empty() {
            anyhow::bail!("Java version must be specified");
        }
        if self.python_version.trim().is_empty() {
            anyhow::bail!("Python version must be specified");
        }

        Ok(())
    }
}

/// Compose the wire Cassandra version from a major line and optional minor.
///
/// Only the patch component of the minor is appended: the minor is stored as
/// a full three-component string but the wire format is `<major>.<patch>`.
/// Without a minor (or a minor with no patch component) the major stands
/// alone.
pub fn compose_cassandra_version(major: &str, minor: Option<&str>) -> String {
    match minor.and_then(|m| m.split('.').nth(2)) {
        Some(patch) => format!("{major}.{patch}"),
        None => major.to_string(),
    }
}
