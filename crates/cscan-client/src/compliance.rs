//! Typed client for the compliance summary endpoint.

use cscan_core::{ComplianceSummary, ReportId};

use crate::error::ApiError;
use crate::transport;

/// Client for `/compliance`.
#[derive(Debug, Clone)]
pub struct ComplianceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ComplianceClient {
    pub(crate) fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Fetch the scored summary for a report.
    ///
    /// Calls `GET {base_url}/compliance/reports/{id}/summary`. The response
    /// is returned as sent; consistency checks belong to the caller.
    pub async fn summary(&self, report_id: ReportId) -> Result<ComplianceSummary, ApiError> {
        let endpoint = format!("GET /compliance/reports/{report_id}/summary");
        let url = format!("{}/compliance/reports/{report_id}/summary", self.base_url);
        transport::send_json(&endpoint, self.http.get(&url)).await
    }
}
