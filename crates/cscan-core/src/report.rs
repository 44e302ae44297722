//! # Reports and Uploads
//!
//! [`Report`] is the backend record for an uploaded document. New reports
//! are submitted as an [`UploadForm`], which must pass
//! [`UploadForm::validate`] before the client will send it: a single
//! non-empty `.pdf` of at most [`MAX_UPLOAD_BYTES`], with an optional
//! four-digit fiscal year.

use serde::{Deserialize, Serialize};

use crate::error::{FieldErrors, ValidationError};
use crate::identity::ReportId;
use crate::status::ReportStatus;
use crate::temporal::Timestamp;

/// Largest accepted upload: 20 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// An uploaded report as returned by the backend.
///
/// List responses omit `processed_text`; it defaults to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Backend identifier.
    pub id: ReportId,
    /// Original file name.
    pub file_name: String,
    /// Size of the stored file in bytes.
    pub file_size: u64,
    /// When the file was received.
    pub upload_date: Timestamp,
    /// Current processing status, driven by the backend.
    pub status: ReportStatus,
    /// Company the report belongs to, if supplied at upload.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Fiscal year covered, if supplied at upload.
    #[serde(default)]
    pub fiscal_year: Option<i32>,
    /// Extracted text, present on single-report fetches once processed.
    #[serde(default)]
    pub processed_text: Option<String>,
    /// Set by the backend.
    pub created_at: Timestamp,
    /// Set by the backend.
    pub updated_at: Timestamp,
}

/// Raw upload-form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    /// Name of the selected file.
    pub file_name: String,
    /// File contents.
    pub contents: Vec<u8>,
    /// Company name as typed; blank means none.
    pub company_name: Option<String>,
    /// Fiscal year as typed; blank means none.
    pub fiscal_year: Option<String>,
}

impl UploadForm {
    /// A form with only a file selected.
    pub fn new(file_name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            contents,
            company_name: None,
            fiscal_year: None,
        }
    }

    /// Set the company name.
    pub fn with_company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    /// Set the fiscal year text.
    pub fn with_fiscal_year(mut self, fiscal_year: impl Into<String>) -> Self {
        self.fiscal_year = Some(fiscal_year.into());
        self
    }

    /// Check every field and produce a submittable upload.
    ///
    /// # Errors
    ///
    /// Returns every failed constraint, in field order.
    pub fn validate(self) -> Result<ReportUpload, FieldErrors> {
        let mut errors = Vec::new();

        if let Err(e) = check_upload_size(&self.file_name, self.contents.len() as u64) {
            errors.push(e);
        }

        let fiscal_year = match self.fiscal_year.as_deref() {
            None | Some("") => None,
            Some(raw) => match parse_fiscal_year(raw) {
                Some(year) => Some(year),
                None => {
                    errors.push(ValidationError::InvalidFiscalYear(raw.to_string()));
                    None
                }
            },
        };

        FieldErrors::collect(errors)?;

        Ok(ReportUpload {
            file_name: self.file_name,
            contents: self.contents,
            company_name: self.company_name.filter(|c| !c.trim().is_empty()),
            fiscal_year,
        })
    }
}

/// Check a file's name and size against the upload constraints.
///
/// Usable before the file is read, so an oversized file is rejected without
/// loading it.
///
/// # Errors
///
/// Returns the first failed file constraint: wrong extension, empty, or too
/// large.
pub fn check_upload_size(file_name: &str, size: u64) -> Result<(), ValidationError> {
    if !file_name.to_ascii_lowercase().ends_with(".pdf") {
        return Err(ValidationError::NotPdf {
            file_name: file_name.to_string(),
        });
    }
    if size == 0 {
        return Err(ValidationError::EmptyFile {
            file_name: file_name.to_string(),
        });
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge {
            file_name: file_name.to_string(),
            size,
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

fn parse_fiscal_year(raw: &str) -> Option<u16> {
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse().ok()
    } else {
        None
    }
}

/// An upload that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportUpload {
    file_name: String,
    contents: Vec<u8>,
    company_name: Option<String>,
    fiscal_year: Option<u16>,
}

impl ReportUpload {
    /// File name sent with the multipart `file` part.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// File contents.
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Non-blank company name.
    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    /// Four-digit fiscal year.
    pub fn fiscal_year(&self) -> Option<u16> {
        self.fiscal_year
    }

    /// Size of the contents in bytes.
    pub fn size(&self) -> u64 {
        self.contents.len() as u64
    }
}
