//! Type-safe selection types for amitui
//!
//! This module replaces stringly-typed selections with proper Rust enums
//! that provide compile-time validation and exhaustive matching.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Operating system images offered by the build service.
///
/// The `Display` string is the exact value the build service expects in the
/// `os` field of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum OperatingSystem {
    #[strum(serialize = "Amazon Linux 2023 AMI")]
    AmazonLinux2023,
    #[strum(serialize = "Amazon Linux 2 AMI")]
    AmazonLinux2,
    #[strum(serialize = "Oracle Linux 9")]
    OracleLinux9,
    #[strum(serialize = "Oracle Linux 8")]
    OracleLinux8,
    #[strum(serialize = "Red Hat Enterprise Linux 9")]
    Rhel9,
    #[strum(serialize = "Red Hat Enterprise Linux 8")]
    Rhel8,
    #[strum(serialize = "Rocky Linux 9")]
    RockyLinux9,
    #[strum(serialize = "Rocky Linux 8")]
    RockyLinux8,
    #[strum(serialize = "Ubuntu LTS 24.04")]
    Ubuntu2404,
    #[strum(serialize = "Ubuntu LTS 22.04")]
    Ubuntu2204,
    #[strum(serialize = "Ubuntu LTS 20.04")]
    Ubuntu2004,
}

impl OperatingSystem {
    /// Vendor family, used to group entries in the OS picker.
    pub fn family(&self) -> &'static str {
        match self {
            Self::AmazonLinux2023 | Self::AmazonLinux2 => "Amazon Linux",
            Self::OracleLinux9 | Self::OracleLinux8 => "Oracle Linux",
            Self::Rhel9 | Self::Rhel8 => "Red Hat Enterprise Linux",
            Self::RockyLinux9 | Self::RockyLinux8 => "Rocky Linux",
            Self::Ubuntu2404 | Self::Ubuntu2204 | Self::Ubuntu2004 => "Ubuntu (LTS)",
        }
    }
}

/// Java distribution options.
///
/// The `Display` string is the wire key sent in the payload; the label is for
/// the picker. Distribution identity does not affect which Java versions are
/// compatible with a Cassandra line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum JavaDistribution {
    #[strum(serialize = "temurin")]
    Temurin,
    #[strum(serialize = "corretto")]
    Corretto,
    #[strum(serialize = "zulu")]
    Zulu,
    #[strum(serialize = "openjdk")]
    OpenJdk,
}

impl JavaDistribution {
    /// Human-readable label for the picker and summary screen.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Temurin => "Eclipse Temurin (Adoptium)",
            Self::Corretto => "Amazon Corretto",
            Self::Zulu => "Zulu OpenJDK (Azul)",
            Self::OpenJdk => "OpenJDK",
        }
    }
}

/// Optional auxiliary tools baked into the image.
///
/// Declaration order is the payload order for enabled tool keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ToolKind {
    #[strum(serialize = "backup")]
    Backup,
    #[strum(serialize = "repairs")]
    Repairs,
}

impl ToolKind {
    /// Human-readable label for the tools screen.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Backup => "Backup (Medusa)",
            Self::Repairs => "Repairs (Reaper)",
        }
    }
}

/// Tools always installed on the image, shown on the summary screen.
pub const REQUIRED_TOOLS: &[&str] = &[
    "curl",
    "wget",
    "tar",
    "unzip",
    "systemd/init.d",
    "openssl",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_operating_system_display() {
        assert_eq!(
            OperatingSystem::Ubuntu2204.to_string(),
            "Ubuntu LTS 22.04"
        );
        assert_eq!(
            OperatingSystem::AmazonLinux2023.to_string(),
            "Amazon Linux 2023 AMI"
        );
    }

    #[test]
    fn test_operating_system_parsing() {
        assert_eq!(
            OperatingSystem::from_str("Rocky Linux 9").unwrap(),
            OperatingSystem::RockyLinux9
        );
        assert!(OperatingSystem::from_str("TempleOS").is_err());
    }

    #[test]
    fn test_operating_system_families() {
        assert_eq!(OperatingSystem::Rhel8.family(), "Red Hat Enterprise Linux");
        assert_eq!(OperatingSystem::Ubuntu2004.family(), "Ubuntu (LTS)");

        // Every variant belongs to a family
        for os in OperatingSystem::iter() {
            assert!(!os.family().is_empty());
        }
    }

    #[test]
    fn test_java_distribution_keys() {
        assert_eq!(JavaDistribution::Temurin.to_string(), "temurin");
        assert_eq!(JavaDistribution::Corretto.to_string(), "corretto");
        assert_eq!(JavaDistribution::Zulu.to_string(), "zulu");
        assert_eq!(JavaDistribution::OpenJdk.to_string(), "openjdk");
    }

    #[test]
    fn test_java_distribution_parsing() {
        assert_eq!(
            JavaDistribution::from_str("corretto").unwrap(),
            JavaDistribution::Corretto
        );
    }

    #[test]
    fn test_java_distribution_count() {
        assert_eq!(JavaDistribution::iter().count(), 4);
    }

    #[test]
    fn test_tool_kind_keys_and_order() {
        let keys: Vec<String> = ToolKind::iter().map(|t| t.to_string()).collect();
        assert_eq!(keys, vec!["backup".to_string(), "repairs".to_string()]);
    }

    #[test]
    fn test_tool_kind_labels() {
        assert_eq!(ToolKind::Backup.label(), "Backup (Medusa)");
        assert_eq!(ToolKind::Repairs.label(), "Repairs (Reaper)");
    }

    #[test]
    fn test_required_tools_list() {
        assert!(REQUIRED_TOOLS.contains(&"curl"));
        assert!(REQUIRED_TOOLS.contains(&"openssl"));
        assert_eq!(REQUIRED_TOOLS.len(), 6);
    }

    #[test]
    fn test_serde_roundtrip() {
        let original = OperatingSystem::OracleLinux9;
        let json = serde_json::to_string(&original).unwrap();
        let parsed: OperatingSystem = serde_json::from_str(&json).unwrap();
        assert_eq!(original, parsed);
    }
}
