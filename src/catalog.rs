//! Version catalog client
//!
//! Fetches and normalizes the version lists the wizard offers:
//! - Cassandra major lines from the end-of-life catalog
//! - Cassandra minor releases scraped from the archive directory listing
//! - Java LTS releases from the Adoptium catalog, restricted by the
//!   compatibility matrix
//! - Python release cycles from the end-of-life catalog (unfiltered)
//!
//! All HTTP is blocking and runs on worker threads owned by the app shell.
//! Parsing, filtering, and sorting are pure functions so they are testable
//! without a network.

use crate::compat;
use crate::error::{AmiTuiError, Result};
use log::debug;
use regex::Regex;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Cassandra end-of-life catalog (JSON array of release lines).
pub const CASSANDRA_EOL_URL: &str = "https://endoflife.date/api/apache-cassandra.json";

/// Cassandra release archive root (HTML directory listing).
pub const CASSANDRA_ARCHIVE_URL: &str = "https://archive.apache.org/dist/cassandra/";

/// Adoptium available-releases catalog.
pub const ADOPTIUM_RELEASES_URL: &str = "https://api.adoptium.net/v3/info/available_releases";

/// Python end-of-life catalog.
pub const PYTHON_EOL_URL: &str = "https://endoflife.date/api/python.json";

/// Release lines below this cycle are never offered.
const MIN_SUPPORTED_CYCLE: f64 = 4.0;

// ============================================================================
// Catalog data model
// ============================================================================

/// End-of-life marker as published by the catalog.
///
/// The upstream `eol` field is either a boolean or a date string. A date
/// means the line is (or will be) end-of-life; only a literal `false` counts
/// as supported.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EolStatus {
    Flag(bool),
    Date(String),
}

impl Default for EolStatus {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl EolStatus {
    /// True unless the catalog says literally `false`.
    pub fn is_eol(&self) -> bool {
        !matches!(self, Self::Flag(false))
    }
}

/// One Cassandra release line from the end-of-life catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CassandraRelease {
    pub cycle: String,
    #[serde(rename = "releaseDate", default)]
    pub release_date: String,
    #[serde(default)]
    pub eol: EolStatus,
    #[serde(default)]
    pub prerelease: bool,
}

impl CassandraRelease {
    /// Picker label matching the wizard's display format.
    pub fn display_line(&self) -> String {
        format!("{} (Released: {})", self.cycle, self.release_date)
    }
}

/// Adoptium available-releases response.
#[derive(Debug, Clone, Deserialize)]
struct AdoptiumReleases {
    #[serde(default)]
    available_lts_releases: Vec<u32>,
}

/// One Python release cycle from the end-of-life catalog.
#[derive(Debug, Clone, Deserialize)]
struct PythonCycle {
    cycle: String,
}

// ============================================================================
// Per-category fetch status
// ============================================================================

/// Fetch status for one catalog category.
///
/// Replaces independent loading/error flags so illegal combinations
/// (loading with data, error with data) are unrepresentable.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogStatus<T> {
    /// No fetch issued for the current scope.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The fetch completed with data.
    Ready(T),
    /// The fetch failed; the reason is kept for logging even when the UI
    /// does not show it.
    Failed(String),
}

impl<T> CatalogStatus<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Blocking HTTP client over the four external catalogs.
///
/// Cheap to clone; clones share the underlying connection pool, which is what
/// the per-fetch worker threads rely on.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::blocking::Client,
    eol_url: String,
    archive_url: String,
    adoptium_url: String,
    python_url: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClient {
    /// Create a client against the production catalog endpoints.
    pub fn new() -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            eol_url: CASSANDRA_EOL_URL.to_string(),
            archive_url: CASSANDRA_ARCHIVE_URL.to_string(),
            adoptium_url: ADOPTIUM_RELEASES_URL.to_string(),
            python_url: PYTHON_EOL_URL.to_string(),
        }
    }

    /// Fetch the supported Cassandra major lines.
    ///
    /// Source order is preserved (the catalog lists cycles ascending).
    pub fn fetch_cassandra_majors(&self) -> Result<Vec<CassandraRelease>> {
        let releases: Vec<CassandraRelease> = self
            .http
            .get(&self.eol_url)
            .send()?
            .error_for_status()?
            .json()?;
        let supported = filter_supported(releases);
        debug!("fetched {} supported Cassandra major lines", supported.len());
        Ok(supported)
    }

    /// Fetch the minor releases available for a major line.
    ///
    /// Scrapes the archive directory listing for `<major>.<patch>/` entries.
    pub fn fetch_minor_versions(&self, major: &str) -> Result<Vec<String>> {
        let html = self
            .http
            .get(&self.archive_url)
            .send()?
            .error_for_status()?
            .text()?;
        extract_minor_versions(&html, major)
    }

    /// Fetch the Java LTS releases compatible with a Cassandra major line.
    ///
    /// The Adoptium list is intersected with the compatibility matrix; an
    /// unmapped major yields an empty list.
    pub fn fetch_java_versions(&self, major: &str) -> Result<Vec<String>> {
        let releases: AdoptiumReleases = self
            .http
            .get(&self.adoptium_url)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(intersect_lts(&releases.available_lts_releases, major))
    }

    /// Fetch all Python release cycles.
    ///
    /// Deliberately unfiltered: no Cassandra/Python compatibility rule is
    /// enforced.
    pub fn fetch_python_versions(&self) -> Result<Vec<String>> {
        let cycles: Vec<PythonCycle> = self
            .http
            .get(&self.python_url)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(cycles.into_iter().map(|c| c.cycle).collect())
    }
}

// ============================================================================
// Pure normalization helpers
// ============================================================================

/// Keep only release lines eligible for selection: not end-of-life, not a
/// prerelease, and cycle >= 4.0.
pub fn filter_supported(releases: Vec<CassandraRelease>) -> Vec<CassandraRelease> {
    releases
        .into_iter()
        .filter(|r| !r.eol.is_eol() && !r.prerelease && cycle_number(&r.cycle) >= MIN_SUPPORTED_CYCLE)
        .collect()
}

/// Extract the minor releases for `major` from an archive directory listing.
///
/// Matches every `<major>.<patch>/` substring, strips the separator,
/// deduplicates, drops prerelease-looking names, and sorts ascending by
/// numeric tuple comparison.
pub fn extract_minor_versions(html: &str, major: &str) -> Result<Vec<String>> {
    let pattern = format!(r"{}\.\d+/", regex::escape(major));
    let re = Regex::new(&pattern)
        .map_err(|e| AmiTuiError::catalog(format!("bad minor-version pattern: {e}")))?;

    let mut seen = HashSet::new();
    let mut versions: Vec<String> = re
        .find_iter(html)
        .map(|m| m.as_str().trim_end_matches('/').to_string())
        .filter(|v| seen.insert(v.clone()))
        .filter(|v| !is_prerelease_like(v))
        .collect();
    versions.sort_by(|a, b| compare_versions(a, b));
    Ok(versions)
}

/// True for names carrying a prerelease marker (alpha, beta, rc).
pub fn is_prerelease_like(version: &str) -> bool {
    let lower = version.to_lowercase();
    lower.contains("alpha") || lower.contains("beta") || lower.contains("rc")
}

/// Order two dotted version strings component-wise numerically.
///
/// Component-wise, not lexicographic: `4.10` sorts after `4.9`. Missing or
/// non-numeric components compare as zero.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let pa: Vec<u64> = a.split('.').map(|c| c.parse().unwrap_or(0)).collect();
    let pb: Vec<u64> = b.split('.').map(|c| c.parse().unwrap_or(0)).collect();
    let len = pa.len().max(pb.len());
    for i in 0..len {
        let ca = pa.get(i).copied().unwrap_or(0);
        let cb = pb.get(i).copied().unwrap_or(0);
        match ca.cmp(&cb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Intersect the fetched LTS list with the matrix entry for `major`.
pub fn intersect_lts(lts_releases: &[u32], major: &str) -> Vec<String> {
    match compat::allowed_java_versions(major) {
        Some(allowed) => lts_releases
            .iter()
            .filter(|v| allowed.contains(v))
            .map(|v| v.to_string())
            .collect(),
        None => Vec::new(),
    }
}

/// Numeric value of a release cycle ("4.1" -> 4.1); unparseable cycles are 0.
fn cycle_number(cycle: &str) -> f64 {
    cycle.parse().unwrap_or(0.0)
}
