//! # Error Hierarchy
//!
//! Structured error types for the client core, built with `thiserror`.
//!
//! - [`ValidationError`]: a single form constraint failed. Never reaches the
//!   network; the view layer renders it next to the offending field.
//! - [`FieldErrors`]: every constraint that failed for one submission, in
//!   field order.
//! - [`DataIntegrityError`]: the backend returned data that breaks an
//!   invariant the client relies on. Surfaced, never repaired.
//! - [`StateTransitionError`]: a report status change the lifecycle does
//!   not permit.

use thiserror::Error;

use crate::identity::{ReportId, RequirementId};
use crate::status::ReportStatus;

/// A single failed form constraint.
///
/// Each variant names the field it belongs to via [`ValidationError::field`]
/// and carries enough context for an actionable inline message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Requirement name is shorter than the minimum.
    #[error("name must be at least {min} characters (got {actual})")]
    NameTooShort {
        /// Minimum character count.
        min: usize,
        /// Character count of the submitted value.
        actual: usize,
    },

    /// Requirement description is shorter than the minimum.
    #[error("description must be at least {min} characters (got {actual})")]
    DescriptionTooShort {
        /// Minimum character count.
        min: usize,
        /// Character count of the submitted value.
        actual: usize,
    },

    /// Fiscal year is not exactly four ASCII digits.
    #[error("fiscal year must be a 4-digit number: \"{0}\"")]
    InvalidFiscalYear(String),

    /// Uploaded file does not carry a `.pdf` extension.
    #[error("only PDF files are accepted: \"{file_name}\"")]
    NotPdf {
        /// The rejected file name.
        file_name: String,
    },

    /// Uploaded file has no content.
    #[error("file \"{file_name}\" is empty")]
    EmptyFile {
        /// The rejected file name.
        file_name: String,
    },

    /// Uploaded file exceeds the maximum upload size.
    #[error("file \"{file_name}\" is {size} bytes; the maximum upload size is {}MB", .max / (1024 * 1024))]
    FileTooLarge {
        /// The rejected file name.
        file_name: String,
        /// Size of the file in bytes.
        size: u64,
        /// Maximum accepted size in bytes.
        max: u64,
    },

    /// A partial update that changes nothing.
    #[error("nothing to update: at least one field must be set")]
    EmptyPatch,
}

impl ValidationError {
    /// The form field this error should be attached to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameTooShort { .. } => "name",
            Self::DescriptionTooShort { .. } => "description",
            Self::InvalidFiscalYear(_) => "fiscal_year",
            Self::NotPdf { .. } | Self::EmptyFile { .. } | Self::FileTooLarge { .. } => "file",
            Self::EmptyPatch => "form",
        }
    }
}

/// All constraint failures for one submission.
///
/// Always non-empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors(Vec<ValidationError>);

impl FieldErrors {
    pub(crate) fn collect(errors: Vec<ValidationError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self(errors))
        }
    }

    /// Iterate over the individual failures in field order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Failures attached to the named field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0.iter().filter(move |e| e.field() == field)
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no failures. Never true for a returned error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the underlying list.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(e: ValidationError) -> Self {
        Self(vec![e])
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {e}", e.field())?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Backend data that violates a client-side invariant.
///
/// These are distinct from transport failures: the request succeeded but the
/// payload cannot be trusted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataIntegrityError {
    /// The summary belongs to a different report than the one requested.
    #[error("summary for report {actual} returned when report {expected} was requested")]
    ReportMismatch {
        /// The report whose summary was requested.
        expected: ReportId,
        /// The report the summary claims to describe.
        actual: ReportId,
    },

    /// `total_requirements` does not equal the number of results.
    #[error("report {report_id}: total_requirements is {total} but {results} results were returned")]
    TotalMismatch {
        /// The report the summary describes.
        report_id: ReportId,
        /// Declared total.
        total: u64,
        /// Number of result rows.
        results: usize,
    },

    /// The per-verdict counts do not add up to the total.
    #[error(
        "report {report_id}: compliant ({compliant}) + non-compliant ({non_compliant}) + pending ({pending}) != total ({total})"
    )]
    CountSumMismatch {
        /// The report the summary describes.
        report_id: ReportId,
        /// Declared total.
        total: u64,
        /// Declared compliant count.
        compliant: u64,
        /// Declared non-compliant count.
        non_compliant: u64,
        /// Declared pending count.
        pending: u64,
    },

    /// Overall percentage is not a finite value in `[0, 100]`.
    #[error("report {report_id}: overall compliance percentage {value} is outside [0, 100]")]
    PercentageOutOfRange {
        /// The report the summary describes.
        report_id: ReportId,
        /// The offending value.
        value: f64,
    },

    /// A confidence score is not a finite value in `[0, 1]`.
    #[error("requirement {requirement_id}: confidence score {value} is outside [0, 1]")]
    ConfidenceOutOfRange {
        /// The requirement whose result carries the score.
        requirement_id: RequirementId,
        /// The offending value.
        value: f64,
    },

    /// An observed status change the lifecycle cannot produce.
    #[error("report {report_id}: status went from {from} to {to}, which the lifecycle does not allow")]
    StatusRegression {
        /// The report being observed.
        report_id: ReportId,
        /// Previously observed status.
        from: ReportStatus,
        /// Newly observed status.
        to: ReportStatus,
    },
}

/// Errors during report status transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateTransitionError {
    /// The attempted transition is not valid from the current state.
    #[error("invalid transition from {from} to {to}: {reason}")]
    InvalidTransition {
        /// The current state.
        from: ReportStatus,
        /// The attempted target state.
        to: ReportStatus,
        /// Human-readable reason for the rejection.
        reason: String,
    },
}
