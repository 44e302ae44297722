//! User-facing error taxonomy.
//!
//! Every view operation returns a [`ViewError`] on failure; the front end
//! decides how to render it from [`ViewError::surface`].

use cscan_client::ApiError;
use cscan_core::{DataIntegrityError, FieldErrors, ReportId};

/// Failure of a view operation.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// Local form validation failed; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// The request failed in transport or with a non-2xx status.
    #[error("request failed: {0}")]
    Request(#[source] ApiError),

    /// The backend has no such entity.
    #[error("not found: {0}")]
    NotFound(#[source] ApiError),

    /// The backend returned data that breaks an invariant.
    #[error("inconsistent data: {0}")]
    DataIntegrity(#[from] DataIntegrityError),

    /// The backend reported the report as `failed`.
    #[error("report {report_id} failed processing")]
    ProcessingFailure {
        /// The failed report.
        report_id: ReportId,
    },
}

impl From<ApiError> for ViewError {
    fn from(e: ApiError) -> Self {
        if e.is_not_found() {
            Self::NotFound(e)
        } else {
            Self::Request(e)
        }
    }
}

/// How a [`ViewError`] is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Next to the offending form field.
    InlineField,
    /// Transient notification; displayed state stays as it was.
    Notification,
    /// Dedicated "not found" page in place of the view.
    NotFoundPage,
    /// Persistent alert that the data cannot be shown.
    IntegrityAlert,
    /// Terminal state panel with re-upload guidance.
    ProcessingFailure,
}

impl ViewError {
    /// Where this error belongs on screen.
    pub fn surface(&self) -> Surface {
        match self {
            Self::Validation(_) => Surface::InlineField,
            Self::Request(_) => Surface::Notification,
            Self::NotFound(_) => Surface::NotFoundPage,
            Self::DataIntegrity(_) => Surface::IntegrityAlert,
            Self::ProcessingFailure { .. } => Surface::ProcessingFailure,
        }
    }

    /// Message for the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) => errors.to_string(),
            Self::Request(e) => e.user_message(),
            Self::NotFound(e) => match e {
                ApiError::NotFound {
                    detail: Some(detail),
                    ..
                } => detail.clone(),
                _ => "The requested item could not be found.".to_string(),
            },
            Self::DataIntegrity(e) => {
                format!("The server returned inconsistent compliance data ({e}). It is not shown.")
            }
            Self::ProcessingFailure { report_id } => format!(
                "Report {report_id} could not be processed. Upload the file again to retry."
            ),
        }
    }
}
