//! # cscan-client: typed client for the compliance-scan backend
//!
//! Wraps the backend's `/api/v1` HTTP interface:
//! - **Reports** via `/reports` (upload, list, fetch, download, delete)
//! - **Requirements** via `/requirements` (catalog CRUD)
//! - **Compliance** via `/compliance/reports/{id}/summary`
//!
//! ## Error Policy
//!
//! Requests are sent exactly once. Any non-2xx response is an [`ApiError`];
//! 404 is reported as [`ApiError::NotFound`] so callers can tell a missing
//! entity apart from a failed request. Nothing here validates payload
//! consistency; that is the view layer's job.
//!
//! Views depend on the [`ComplianceBackend`] trait rather than on
//! [`ApiClient`] directly.

pub mod backend;
pub mod compliance;
pub mod config;
pub mod error;
pub mod reports;
pub mod requirements;
mod transport;

pub use backend::ComplianceBackend;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use reports::ReportQuery;
pub use requirements::RequirementQuery;

use std::time::Duration;

/// Top-level backend client. Holds one sub-client per resource.
#[derive(Debug, Clone)]
pub struct ApiClient {
    reports: reports::ReportClient,
    requirements: requirements::RequirementClient,
    compliance: compliance::ComplianceClient,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        let root = config.api_root();
        tracing::debug!(api_root = %root, timeout_secs = config.timeout_secs, "api client ready");

        Ok(Self {
            reports: reports::ReportClient::new(http.clone(), root.clone()),
            requirements: requirements::RequirementClient::new(http.clone(), root.clone()),
            compliance: compliance::ComplianceClient::new(http, root),
        })
    }

    /// Access the reports client.
    pub fn reports(&self) -> &reports::ReportClient {
        &self.reports
    }

    /// Access the requirements client.
    pub fn requirements(&self) -> &requirements::RequirementClient {
        &self.requirements
    }

    /// Access the compliance client.
    pub fn compliance(&self) -> &compliance::ComplianceClient {
        &self.compliance
    }
}
