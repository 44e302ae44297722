//! In-memory `ComplianceBackend` for view tests.
//!
//! Records every call by name, in order. Calls are recorded when the
//! returned future is first polled, like a real HTTP request.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use cscan_client::{ApiError, ComplianceBackend, ReportQuery, RequirementQuery};
use cscan_core::{
    ComplianceSummary, NewRequirement, Report, ReportId, ReportStatus, ReportUpload, Requirement,
    RequirementId, RequirementResult, Timestamp, ValidatedPatch,
};

pub fn ts() -> Timestamp {
    Timestamp::parse("2026-03-02T09:15:27").unwrap()
}

pub fn report(id: i64, status: ReportStatus) -> Report {
    Report {
        id: ReportId::new(id),
        file_name: format!("report-{id}.pdf"),
        file_size: 48_213,
        upload_date: ts(),
        status,
        company_name: Some("Acme Holdings".into()),
        fiscal_year: Some(2024),
        processed_text: None,
        created_at: ts(),
        updated_at: ts(),
    }
}

pub fn requirement(id: i64, name: &str, category: Option<&str>, active: bool) -> Requirement {
    Requirement {
        id: RequirementId::new(id),
        name: name.into(),
        description: format!("{name} is disclosed in the report"),
        category: category.map(Into::into),
        active,
        created_at: ts(),
        updated_at: ts(),
    }
}

/// A consistent summary: one compliant, one non-compliant, one pending.
pub fn summary(report_id: i64) -> ComplianceSummary {
    let result = |id: i64, flag: Option<bool>, score: Option<f64>| RequirementResult {
        id: RequirementId::new(id),
        name: format!("Requirement {id}"),
        description: "Disclosure is present".into(),
        category: Some("Environmental".into()),
        is_compliant: flag,
        confidence_score: score,
        extracted_evidence: None,
    };
    ComplianceSummary {
        report_id: ReportId::new(report_id),
        total_requirements: 3,
        compliant_count: 1,
        non_compliant_count: 1,
        pending_count: 1,
        overall_compliance_percentage: 33.33,
        results: vec![
            result(1, Some(true), Some(0.92)),
            result(2, Some(false), Some(0.61)),
            result(3, None, None),
        ],
    }
}

fn not_found(endpoint: String, what: &str) -> ApiError {
    ApiError::NotFound {
        endpoint,
        detail: Some(format!("{what} not found.")),
    }
}

fn server_error(endpoint: &str) -> ApiError {
    ApiError::Status {
        endpoint: endpoint.into(),
        status: 500,
        detail: None,
    }
}

#[derive(Default)]
pub struct StubBackend {
    calls: Mutex<Vec<&'static str>>,
    /// Statuses returned by successive `get_report` calls; the last repeats.
    statuses: Mutex<VecDeque<ReportStatus>>,
    summary: Mutex<Option<ComplianceSummary>>,
    requirements: Mutex<Vec<Requirement>>,
    next_id: Mutex<i64>,
    report_delay: Mutex<Option<Duration>>,
    fail_reports: AtomicBool,
    fail_lists: AtomicBool,
}

impl StubBackend {
    pub fn with_statuses(statuses: &[ReportStatus]) -> Self {
        let stub = Self::default();
        *stub.statuses.lock().unwrap() = statuses.iter().copied().collect();
        stub
    }

    pub fn with_requirements(requirements: Vec<Requirement>) -> Self {
        let stub = Self::default();
        let max = requirements.iter().map(|r| r.id.get()).max().unwrap_or(0);
        *stub.next_id.lock().unwrap() = max + 1;
        *stub.requirements.lock().unwrap() = requirements;
        stub
    }

    pub fn set_summary(&self, summary: ComplianceSummary) {
        *self.summary.lock().unwrap() = Some(summary);
    }

    pub fn delay_reports(&self, delay: Duration) {
        *self.report_delay.lock().unwrap() = Some(delay);
    }

    pub fn fail_reports(&self, fail: bool) {
        self.fail_reports.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == name).count()
    }

    pub fn stored_requirements(&self) -> Vec<Requirement> {
        self.requirements.lock().unwrap().clone()
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    fn next_status(&self) -> Option<ReportStatus> {
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().copied()
        }
    }
}

impl ComplianceBackend for StubBackend {
    fn list_reports(
        &self,
        _query: &ReportQuery,
    ) -> impl Future<Output = Result<Vec<Report>, ApiError>> + Send {
        async move {
            self.record("list_reports");
            Ok(Vec::new())
        }
    }

    fn get_report(&self, id: ReportId) -> impl Future<Output = Result<Report, ApiError>> + Send {
        async move {
            self.record("get_report");
            let delay = *self.report_delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_reports.load(Ordering::SeqCst) {
                return Err(server_error("GET /reports/{id}"));
            }
            match self.next_status() {
                Some(status) => Ok(report(id.get(), status)),
                None => Err(not_found(format!("GET /reports/{id}"), "Report")),
            }
        }
    }

    fn upload_report(
        &self,
        upload: &ReportUpload,
    ) -> impl Future<Output = Result<Report, ApiError>> + Send {
        let file_name = upload.file_name().to_string();
        async move {
            self.record("upload_report");
            let mut created = report(100, ReportStatus::Pending);
            created.file_name = file_name;
            Ok(created)
        }
    }

    fn download_report(
        &self,
        _id: ReportId,
    ) -> impl Future<Output = Result<Vec<u8>, ApiError>> + Send {
        async move {
            self.record("download_report");
            Ok(b"%PDF-1.7".to_vec())
        }
    }

    fn delete_report(&self, _id: ReportId) -> impl Future<Output = Result<(), ApiError>> + Send {
        async move {
            self.record("delete_report");
            Ok(())
        }
    }

    fn compliance_summary(
        &self,
        report_id: ReportId,
    ) -> impl Future<Output = Result<ComplianceSummary, ApiError>> + Send {
        async move {
            self.record("compliance_summary");
            let summary = self.summary.lock().unwrap().clone();
            summary.ok_or_else(|| {
                not_found(
                    format!("GET /compliance/reports/{report_id}/summary"),
                    "Summary",
                )
            })
        }
    }

    fn list_requirements(
        &self,
        _query: &RequirementQuery,
    ) -> impl Future<Output = Result<Vec<Requirement>, ApiError>> + Send {
        async move {
            self.record("list_requirements");
            if self.fail_lists.load(Ordering::SeqCst) {
                return Err(server_error("GET /requirements"));
            }
            Ok(self.requirements.lock().unwrap().clone())
        }
    }

    fn create_requirement(
        &self,
        body: &NewRequirement,
    ) -> impl Future<Output = Result<Requirement, ApiError>> + Send {
        let body = body.clone();
        async move {
            self.record("create_requirement");
            let id = {
                let mut next = self.next_id.lock().unwrap();
                let id = (*next).max(1);
                *next = id + 1;
                id
            };
            let mut created = requirement(id, body.name(), body.category(), body.active());
            created.description = body.description().to_string();
            self.requirements.lock().unwrap().push(created.clone());
            Ok(created)
        }
    }

    fn update_requirement(
        &self,
        id: RequirementId,
        patch: &ValidatedPatch,
    ) -> impl Future<Output = Result<Requirement, ApiError>> + Send {
        let fields = serde_json::to_value(patch).unwrap();
        async move {
            self.record("update_requirement");
            let mut store = self.requirements.lock().unwrap();
            let Some(existing) = store.iter_mut().find(|r| r.id == id) else {
                return Err(not_found(format!("PATCH /requirements/{id}"), "Requirement"));
            };
            if let Some(name) = fields.get("name").and_then(|v| v.as_str()) {
                existing.name = name.to_string();
            }
            if let Some(description) = fields.get("description").and_then(|v| v.as_str()) {
                existing.description = description.to_string();
            }
            if let Some(category) = fields.get("category") {
                existing.category = category.as_str().map(str::to_string);
            }
            if let Some(active) = fields.get("active").and_then(|v| v.as_bool()) {
                existing.active = active;
            }
            Ok(existing.clone())
        }
    }

    fn delete_requirement(
        &self,
        id: RequirementId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        async move {
            self.record("delete_requirement");
            let mut store = self.requirements.lock().unwrap();
            let before = store.len();
            store.retain(|r| r.id != id);
            if store.len() == before {
                Err(not_found(format!("DELETE /requirements/{id}"), "Requirement"))
            } else {
                Ok(())
            }
        }
    }
}
