//! # Compliance Results
//!
//! Per-report scoring output as computed by the backend: one
//! [`RequirementResult`] per requirement, rolled up into a
//! [`ComplianceSummary`]. The client treats the summary's counts and
//! percentage as authoritative and only checks them for consistency
//! (see `cscan-view::aggregate`).

use serde::{Deserialize, Serialize};

use crate::identity::{ReportId, RequirementId};

/// Tri-state verdict for one requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The report satisfies the requirement.
    Compliant,
    /// The report does not satisfy the requirement.
    NonCompliant,
    /// Not evaluated yet.
    Pending,
}

impl Verdict {
    /// Map the wire representation (`true` / `false` / `null`).
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Compliant,
            Some(false) => Self::NonCompliant,
            None => Self::Pending,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::NonCompliant => "Non-Compliant",
            Self::Pending => "Pending",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Scoring outcome for one requirement, with the requirement's fields
/// copied at scan time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementResult {
    /// Requirement identifier.
    pub id: RequirementId,
    /// Requirement name at scan time.
    pub name: String,
    /// Requirement description at scan time.
    pub description: String,
    /// Requirement category at scan time.
    #[serde(default)]
    pub category: Option<String>,
    /// `None` until evaluated.
    #[serde(default)]
    pub is_compliant: Option<bool>,
    /// Scorer confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence_score: Option<f64>,
    /// Text snippet supporting the verdict.
    #[serde(default)]
    pub extracted_evidence: Option<String>,
}

impl RequirementResult {
    /// The tri-state verdict.
    pub fn verdict(&self) -> Verdict {
        Verdict::from_flag(self.is_compliant)
    }
}

/// Backend roll-up of a report's results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// Owning report.
    pub report_id: ReportId,
    /// Number of requirements scored.
    pub total_requirements: u64,
    /// Results with a compliant verdict.
    pub compliant_count: u64,
    /// Results with a non-compliant verdict.
    pub non_compliant_count: u64,
    /// Results not yet evaluated.
    pub pending_count: u64,
    /// Backend-computed score in `[0, 100]`.
    pub overall_compliance_percentage: f64,
    /// Per-requirement results, in backend order.
    #[serde(default)]
    pub results: Vec<RequirementResult>,
}
