//! Build request dispatcher
//!
//! Sends the assembled payload to the image-build service and interprets the
//! response. Transport failures never escape: they are converted into a
//! synthetic failure response carrying the error description, so a dead
//! backend degrades into a displayed diagnostic rather than a fault.

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::payload::ImageConfig;

/// Response from the build service.
///
/// Success carries an `ami_id`; failure carries a diagnostic in `output`.
/// Defaults are lenient so a partially-formed response still deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub ami_id: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
}

impl BuildResponse {
    /// A build succeeded only when the service says so and named the image.
    pub fn is_success(&self) -> bool {
        self.status == "success" && self.ami_id.is_some()
    }

    /// Synthetic failure used when the request never produced a real
    /// response.
    fn transport_failure(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            ami_id: None,
            output: Some(message.into()),
        }
    }

    /// Diagnostic to display for a failed build.
    pub fn diagnostic(&self) -> &str {
        self.output.as_deref().unwrap_or(&self.status)
    }
}

/// Client for the image-build service.
#[derive(Debug, Clone)]
pub struct BuildClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl BuildClient {
    /// Default build service address.
    pub const DEFAULT_ENDPOINT: &'static str = "http://127.0.0.1:8000/generate-ami";

    /// Create a client against the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// The endpoint this client submits to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit a build request.
    ///
    /// Never fails: transport and decode errors become a synthetic failure
    /// response. Each invocation is independent; repeated submission is
    /// allowed and there is no retry or in-flight dedup.
    pub fn submit(&self, config: &ImageConfig) -> BuildResponse {
        info!(
            "submitting build request for Cassandra {} to {}",
            config.cassandra_version, self.endpoint
        );
        match self.try_submit(config) {
            Ok(response) => response,
            Err(e) => {
                error!("build dispatch failed: {e}");
                BuildResponse::transport_failure(format!("Error connecting to build service: {e}"))
            }
        }
    }

    fn try_submit(&self, config: &ImageConfig) -> Result<BuildResponse> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(config)
            .send()?
            .json::<BuildResponse>()?;
        Ok(response)
    }
}
