//! Typed client for the report endpoints.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/reports` | List reports, newest first |
//! | GET    | `/reports/{id}` | Get one report with extracted text |
//! | POST   | `/reports` | Upload a PDF (multipart) |
//! | GET    | `/reports/{id}/download` | Raw file bytes |
//! | DELETE | `/reports/{id}` | Delete a report and its results |

use cscan_core::{Report, ReportId, ReportStatus, ReportUpload};
use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::error::ApiError;
use crate::transport;

/// Query parameters for `GET /reports`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ReportQuery {
    /// Only reports currently in `status`.
    pub fn with_status(mut self, status: ReportStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Page window.
    pub fn page(mut self, skip: u32, limit: u32) -> Self {
        self.skip = Some(skip);
        self.limit = Some(limit);
        self
    }
}

/// Client for `/reports`.
#[derive(Debug, Clone)]
pub struct ReportClient {
    http: reqwest::Client,
    base_url: String,
}

impl ReportClient {
    pub(crate) fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// List reports.
    ///
    /// Calls `GET {base_url}/reports`.
    pub async fn list(&self, query: &ReportQuery) -> Result<Vec<Report>, ApiError> {
        let url = format!("{}/reports", self.base_url);
        transport::send_json("GET /reports", self.http.get(&url).query(query)).await
    }

    /// Get one report.
    ///
    /// Calls `GET {base_url}/reports/{id}`.
    pub async fn get(&self, id: ReportId) -> Result<Report, ApiError> {
        let endpoint = format!("GET /reports/{id}");
        let url = format!("{}/reports/{id}", self.base_url);
        transport::send_json(&endpoint, self.http.get(&url)).await
    }

    /// Upload a validated report.
    ///
    /// Calls `POST {base_url}/reports` with a multipart body: the `file`
    /// part plus `company_name` and `fiscal_year` text parts when present.
    pub async fn upload(&self, upload: &ReportUpload) -> Result<Report, ApiError> {
        let endpoint = "POST /reports";
        let url = format!("{}/reports", self.base_url);

        let file = Part::bytes(upload.contents().to_vec())
            .file_name(upload.file_name().to_string())
            .mime_str("application/pdf")
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let mut form = Form::new().part("file", file);
        if let Some(company_name) = upload.company_name() {
            form = form.text("company_name", company_name.to_string());
        }
        if let Some(fiscal_year) = upload.fiscal_year() {
            form = form.text("fiscal_year", fiscal_year.to_string());
        }

        tracing::info!(
            file_name = upload.file_name(),
            size = upload.size(),
            "uploading report"
        );
        transport::send_json(endpoint, self.http.post(&url).multipart(form)).await
    }

    /// Download the stored file.
    ///
    /// Calls `GET {base_url}/reports/{id}/download`.
    pub async fn download(&self, id: ReportId) -> Result<Vec<u8>, ApiError> {
        let endpoint = format!("GET /reports/{id}/download");
        let url = format!("{}/reports/{id}/download", self.base_url);
        transport::send_bytes(&endpoint, self.http.get(&url)).await
    }

    /// Delete a report.
    ///
    /// Calls `DELETE {base_url}/reports/{id}`.
    pub async fn delete(&self, id: ReportId) -> Result<(), ApiError> {
        let endpoint = format!("DELETE /reports/{id}");
        let url = format!("{}/reports/{id}", self.base_url);
        transport::send(&endpoint, self.http.delete(&url)).await?;
        Ok(())
    }
}
