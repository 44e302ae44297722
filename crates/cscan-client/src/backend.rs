//! The backend operations the view layer depends on.
//!
//! [`ComplianceBackend`] is the seam between the views and HTTP: views are
//! generic over it, [`ApiClient`](crate::ApiClient) implements it against
//! the live API, and tests substitute an in-memory stub.

use std::future::Future;

use cscan_core::{
    ComplianceSummary, NewRequirement, Report, ReportId, ReportUpload, Requirement, RequirementId,
    ValidatedPatch,
};

use crate::error::ApiError;
use crate::reports::ReportQuery;
use crate::requirements::RequirementQuery;
use crate::ApiClient;

/// Read/write contract of the compliance backend.
pub trait ComplianceBackend: Send + Sync {
    /// `GET /reports`.
    fn list_reports(
        &self,
        query: &ReportQuery,
    ) -> impl Future<Output = Result<Vec<Report>, ApiError>> + Send;

    /// `GET /reports/{id}`.
    fn get_report(&self, id: ReportId) -> impl Future<Output = Result<Report, ApiError>> + Send;

    /// `POST /reports`.
    fn upload_report(
        &self,
        upload: &ReportUpload,
    ) -> impl Future<Output = Result<Report, ApiError>> + Send;

    /// `GET /reports/{id}/download`.
    fn download_report(
        &self,
        id: ReportId,
    ) -> impl Future<Output = Result<Vec<u8>, ApiError>> + Send;

    /// `DELETE /reports/{id}`.
    fn delete_report(&self, id: ReportId) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `GET /compliance/reports/{id}/summary`.
    fn compliance_summary(
        &self,
        report_id: ReportId,
    ) -> impl Future<Output = Result<ComplianceSummary, ApiError>> + Send;

    /// `GET /requirements`.
    fn list_requirements(
        &self,
        query: &RequirementQuery,
    ) -> impl Future<Output = Result<Vec<Requirement>, ApiError>> + Send;

    /// `POST /requirements`.
    fn create_requirement(
        &self,
        body: &NewRequirement,
    ) -> impl Future<Output = Result<Requirement, ApiError>> + Send;

    /// `PATCH /requirements/{id}`.
    fn update_requirement(
        &self,
        id: RequirementId,
        patch: &ValidatedPatch,
    ) -> impl Future<Output = Result<Requirement, ApiError>> + Send;

    /// `DELETE /requirements/{id}`.
    fn delete_requirement(
        &self,
        id: RequirementId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl ComplianceBackend for ApiClient {
    fn list_reports(
        &self,
        query: &ReportQuery,
    ) -> impl Future<Output = Result<Vec<Report>, ApiError>> + Send {
        self.reports().list(query)
    }

    fn get_report(&self, id: ReportId) -> impl Future<Output = Result<Report, ApiError>> + Send {
        self.reports().get(id)
    }

    fn upload_report(
        &self,
        upload: &ReportUpload,
    ) -> impl Future<Output = Result<Report, ApiError>> + Send {
        self.reports().upload(upload)
    }

    fn download_report(
        &self,
        id: ReportId,
    ) -> impl Future<Output = Result<Vec<u8>, ApiError>> + Send {
        self.reports().download(id)
    }

    fn delete_report(&self, id: ReportId) -> impl Future<Output = Result<(), ApiError>> + Send {
        self.reports().delete(id)
    }

    fn compliance_summary(
        &self,
        report_id: ReportId,
    ) -> impl Future<Output = Result<ComplianceSummary, ApiError>> + Send {
        self.compliance().summary(report_id)
    }

    fn list_requirements(
        &self,
        query: &RequirementQuery,
    ) -> impl Future<Output = Result<Vec<Requirement>, ApiError>> + Send {
        self.requirements().list(query)
    }

    fn create_requirement(
        &self,
        body: &NewRequirement,
    ) -> impl Future<Output = Result<Requirement, ApiError>> + Send {
        self.requirements().create(body)
    }

    fn update_requirement(
        &self,
        id: RequirementId,
        patch: &ValidatedPatch,
    ) -> impl Future<Output = Result<Requirement, ApiError>> + Send {
        self.requirements().update(id, patch)
    }

    fn delete_requirement(
        &self,
        id: RequirementId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        self.requirements().delete(id)
    }
}
