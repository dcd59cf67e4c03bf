//! amitui Library
//!
//! Core functionality for the Cassandra AMI configurator TUI: catalog
//! fetching and normalization, the selection state machine, payload
//! assembly, and build dispatch.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod compat;
pub mod dispatch;
pub mod error;
pub mod payload;
pub mod selection;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, AppState, CatalogMessage, ConfigureField, FetchRequest};
pub use catalog::{CassandraRelease, CatalogClient, CatalogStatus, EolStatus};
pub use compat::allowed_java_versions;
pub use dispatch::{BuildClient, BuildResponse};
pub use error::AmiTuiError;
pub use payload::ImageConfig;
pub use selection::{reduce, SelectionAction, ToolSelection, WizardSelection, WizardStep};
pub use types::{JavaDistribution, OperatingSystem, ToolKind, REQUIRED_TOOLS};
