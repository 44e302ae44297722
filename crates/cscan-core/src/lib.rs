#![deny(missing_docs)]

//! # cscan-core: Foundational Types for the Compliance Scan Client
//!
//! This crate defines the records every other crate in the workspace
//! exchanges with the compliance backend, plus the rules the client enforces
//! locally before anything reaches the network. It has no internal crate
//! dependencies: only `serde`, `thiserror` and `chrono`.
//!
//! ## Design Principles
//!
//! 1. **Newtype identifiers.** A [`ReportId`] cannot be passed where a
//!    [`RequirementId`] is expected.
//!
//! 2. **Validated-by-construction submissions.** The only way to obtain a
//!    [`NewRequirement`], [`ValidatedPatch`], or [`ReportUpload`] is through
//!    the corresponding `validate()` call, so the HTTP client can only ever
//!    send payloads that passed the form constraints.
//!
//! 3. **Single [`ReportStatus`] enum.** The four-state lifecycle and its
//!    legal transitions live in one place.
//!
//! 4. **Structured errors.** [`ValidationError`], [`DataIntegrityError`], and
//!    [`StateTransitionError`] are `thiserror` enums; no `.unwrap()` outside
//!    tests.

pub mod compliance;
pub mod error;
pub mod identity;
pub mod report;
pub mod requirement;
pub mod status;
pub mod temporal;

pub use compliance::{ComplianceSummary, RequirementResult, Verdict};
pub use error::{DataIntegrityError, FieldErrors, StateTransitionError, ValidationError};
pub use identity::{ReportId, RequirementId};
pub use report::{check_upload_size, Report, ReportUpload, UploadForm, MAX_UPLOAD_BYTES};
pub use requirement::{
    NewRequirement, Requirement, RequirementDraft, RequirementPatch, ValidatedPatch,
    DESCRIPTION_MIN_CHARS, NAME_MIN_CHARS,
};
pub use status::ReportStatus;
pub use temporal::Timestamp;
