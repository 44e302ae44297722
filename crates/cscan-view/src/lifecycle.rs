//! # Report Lifecycle Tracking
//!
//! A [`ReportTracker`] follows one report by id. Each [`load`] fetches the
//! report, checks the observed status against the previous observation, and
//! produces a [`ReportView`]. The compliance summary is fetched only when
//! the report is `completed`, and is validated before it is shown.
//!
//! A failed fetch is an `Err(ViewError)`; a report the backend marked
//! `failed` is `Ok(ReportView::Failed)`. The two are never merged.
//!
//! [`load`]: ReportTracker::load

use std::sync::Arc;
use std::time::Duration;

use cscan_client::ComplianceBackend;
use cscan_core::{
    ComplianceSummary, DataIntegrityError, Report, ReportId, ReportStatus, UploadForm,
};

use crate::aggregate::{validate_summary, CompliancePanel};
use crate::error::ViewError;
use crate::scope::ViewScope;

/// Interval between status polls in [`ReportTracker::watch`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// What a report screen shows, by lifecycle state.
///
/// A summary exists only in the `Completed` variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportView {
    /// Queued; nothing to show beyond metadata.
    Pending(Report),
    /// Being scored.
    Processing(Report),
    /// Scored, with a validated summary.
    Completed {
        /// The report record.
        report: Report,
        /// Its compliance summary.
        summary: ComplianceSummary,
    },
    /// Processing failed for good.
    Failed(Report),
}

impl ReportView {
    /// The report record.
    pub fn report(&self) -> &Report {
        match self {
            Self::Pending(report)
            | Self::Processing(report)
            | Self::Completed { report, .. }
            | Self::Failed(report) => report,
        }
    }

    /// Lifecycle state.
    pub fn status(&self) -> ReportStatus {
        match self {
            Self::Pending(_) => ReportStatus::Pending,
            Self::Processing(_) => ReportStatus::Processing,
            Self::Completed { .. } => ReportStatus::Completed,
            Self::Failed(_) => ReportStatus::Failed,
        }
    }

    /// The summary, when completed.
    pub fn summary(&self) -> Option<&ComplianceSummary> {
        match self {
            Self::Completed { summary, .. } => Some(summary),
            _ => None,
        }
    }

    /// Display derivations for the summary, when completed.
    pub fn panel(&self) -> Option<CompliancePanel> {
        self.summary().map(CompliancePanel::from_summary)
    }

    /// The summary if completed, `None` while still in progress.
    ///
    /// # Errors
    ///
    /// [`ViewError::ProcessingFailure`] for a failed report.
    pub fn outcome(&self) -> Result<Option<&ComplianceSummary>, ViewError> {
        match self {
            Self::Failed(report) => Err(ViewError::ProcessingFailure {
                report_id: report.id,
            }),
            other => Ok(other.summary()),
        }
    }
}

/// Follows one report through its lifecycle.
#[derive(Debug)]
pub struct ReportTracker<B> {
    backend: Arc<B>,
    scope: ViewScope,
    report_id: ReportId,
    last_status: Option<ReportStatus>,
    poll_interval: Duration,
}

impl<B: ComplianceBackend> ReportTracker<B> {
    /// Track `report_id` within `scope`.
    pub fn new(backend: Arc<B>, scope: ViewScope, report_id: ReportId) -> Self {
        Self {
            backend,
            scope,
            report_id,
            last_status: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The tracked report.
    pub fn report_id(&self) -> ReportId {
        self.report_id
    }

    /// Status seen by the most recent successful load.
    pub fn last_status(&self) -> Option<ReportStatus> {
        self.last_status
    }

    /// Fetch the report and, if completed, its summary.
    ///
    /// Returns `Ok(None)` if the view closed before the responses arrived.
    ///
    /// # Errors
    ///
    /// - [`ViewError::NotFound`] if the report does not exist.
    /// - [`ViewError::Request`] if a fetch failed.
    /// - [`ViewError::DataIntegrity`] if the status moved backwards or the
    ///   summary is inconsistent.
    pub async fn load(&mut self) -> Result<Option<ReportView>, ViewError> {
        let id = self.report_id;
        let Some(fetched) = self.scope.run(self.backend.get_report(id)).await else {
            return Ok(None);
        };
        let report = fetched?;
        self.observe(report.status)?;

        let view = match report.status {
            ReportStatus::Pending => ReportView::Pending(report),
            ReportStatus::Processing => ReportView::Processing(report),
            ReportStatus::Failed => {
                tracing::info!(report_id = %id, "report processing failed");
                ReportView::Failed(report)
            }
            ReportStatus::Completed => {
                let Some(fetched) = self.scope.run(self.backend.compliance_summary(id)).await
                else {
                    return Ok(None);
                };
                let summary = fetched?;
                if let Err(e) = validate_summary(id, &summary) {
                    tracing::error!(report_id = %id, error = %e, "rejected compliance summary");
                    return Err(e.into());
                }
                ReportView::Completed { report, summary }
            }
        };
        Ok(Some(view))
    }

    /// Poll until the report reaches a terminal state or the view closes.
    ///
    /// `on_change` is called with every view whose status differs from the
    /// previous one, including the first. Returns the terminal view, or
    /// `None` if the view closed first.
    ///
    /// # Errors
    ///
    /// Stops at the first error from [`load`](Self::load); polling is not
    /// retried.
    pub async fn watch<F>(&mut self, mut on_change: F) -> Result<Option<ReportView>, ViewError>
    where
        F: FnMut(&ReportView),
    {
        let mut shown: Option<ReportStatus> = None;
        loop {
            let Some(view) = self.load().await? else {
                return Ok(None);
            };
            if shown != Some(view.status()) {
                shown = Some(view.status());
                on_change(&view);
            }
            if view.status().is_terminal() {
                return Ok(Some(view));
            }
            tracing::debug!(
                report_id = %self.report_id,
                status = %view.status(),
                interval_ms = self.poll_interval.as_millis() as u64,
                "report not finished; polling again"
            );
            if !self.scope.sleep(self.poll_interval).await {
                return Ok(None);
            }
        }
    }

    fn observe(&mut self, now: ReportStatus) -> Result<(), DataIntegrityError> {
        if let Some(before) = self.last_status {
            if !before.can_reach(now) {
                tracing::error!(
                    report_id = %self.report_id,
                    from = %before,
                    to = %now,
                    "report status moved backwards"
                );
                return Err(DataIntegrityError::StatusRegression {
                    report_id: self.report_id,
                    from: before,
                    to: now,
                });
            }
        }
        self.last_status = Some(now);
        Ok(())
    }
}

/// Validate an upload form and submit it.
///
/// Returns the created report (always `pending`), or `None` if the view
/// closed before the backend answered.
///
/// # Errors
///
/// [`ViewError::Validation`] without any request if the form is invalid;
/// otherwise the backend error.
pub async fn submit_upload<B: ComplianceBackend>(
    backend: &B,
    scope: &ViewScope,
    form: UploadForm,
) -> Result<Option<Report>, ViewError> {
    let upload = form.validate()?;
    let Some(result) = scope.run(backend.upload_report(&upload)).await else {
        return Ok(None);
    };
    let report = result?;
    tracing::info!(report_id = %report.id, status = %report.status, "report uploaded");
    Ok(Some(report))
}
