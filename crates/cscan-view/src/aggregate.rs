//! # Compliance Aggregation
//!
//! The backend computes every count and the overall percentage; the client
//! displays them as sent. Before display, [`validate_summary`] checks that
//! the numbers are consistent with each other. A summary that fails is
//! rejected as a [`DataIntegrityError`], never corrected.
//!
//! The percentage itself is opaque: only its range is checked, not how it
//! was derived from the counts.
//!
//! The rest of this module is pure display math: the circular indicator
//! geometry, the colour band, and the confidence bar value.

use std::f64::consts::PI;

use cscan_core::{ComplianceSummary, DataIntegrityError, ReportId, Verdict};

/// Radius of the circular compliance indicator.
pub const RING_RADIUS: f64 = 45.0;

/// Check a summary's internal consistency.
///
/// # Errors
///
/// Returns the first violated invariant: wrong report, total not matching
/// the result rows, counts not summing to the total, percentage outside
/// `[0, 100]`, or a confidence score outside `[0, 1]`.
pub fn validate_summary(
    expected: ReportId,
    summary: &ComplianceSummary,
) -> Result<(), DataIntegrityError> {
    let report_id = summary.report_id;
    if report_id != expected {
        return Err(DataIntegrityError::ReportMismatch {
            expected,
            actual: report_id,
        });
    }

    if summary.total_requirements != summary.results.len() as u64 {
        return Err(DataIntegrityError::TotalMismatch {
            report_id,
            total: summary.total_requirements,
            results: summary.results.len(),
        });
    }

    let sum = summary
        .compliant_count
        .checked_add(summary.non_compliant_count)
        .and_then(|s| s.checked_add(summary.pending_count));
    if sum != Some(summary.total_requirements) {
        return Err(DataIntegrityError::CountSumMismatch {
            report_id,
            total: summary.total_requirements,
            compliant: summary.compliant_count,
            non_compliant: summary.non_compliant_count,
            pending: summary.pending_count,
        });
    }

    let pct = summary.overall_compliance_percentage;
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(DataIntegrityError::PercentageOutOfRange {
            report_id,
            value: pct,
        });
    }

    for result in &summary.results {
        if let Some(score) = result.confidence_score {
            if !score.is_finite() || !(0.0..=1.0).contains(&score) {
                return Err(DataIntegrityError::ConfidenceOutOfRange {
                    requirement_id: result.id,
                    value: score,
                });
            }
        }
    }

    Ok(())
}

/// Colour band of an overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplianceBand {
    /// Above 80.
    Good,
    /// Above 50, up to and including 80.
    Warning,
    /// 50 or below.
    Critical,
}

impl ComplianceBand {
    /// Band for `percentage`. Each band's lower bound is exclusive, so
    /// exactly 80 is `Warning` and exactly 50 is `Critical`.
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage > 80.0 {
            Self::Good
        } else if percentage > 50.0 {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for ComplianceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stroke geometry of the circular indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingArc {
    /// Full circumference, `2πr`.
    pub circumference: f64,
    /// Filled arc length, `2πr · p/100`.
    pub filled: f64,
    /// Unfilled arc length, `2πr · (1 − p/100)`.
    pub remainder: f64,
    /// Dash offset that starts the arc at 12 o'clock, `2πr · 0.25`.
    pub offset: f64,
}

/// Arc lengths for `percentage` on a ring of `radius`.
pub fn ring_arc(percentage: f64, radius: f64) -> RingArc {
    let circumference = 2.0 * PI * radius;
    RingArc {
        circumference,
        filled: circumference * (percentage / 100.0),
        remainder: circumference * (1.0 - percentage / 100.0),
        offset: circumference * 0.25,
    }
}

/// Confidence bar value: `score * 100` rounded to a whole percent. The
/// stored score is left at full precision.
pub fn confidence_percent(score: f64) -> u32 {
    (score * 100.0).round().clamp(0.0, 100.0) as u32
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// Requirement name at scan time.
    pub name: String,
    /// Requirement category at scan time.
    pub category: Option<String>,
    /// Tri-state verdict.
    pub verdict: Verdict,
    /// Rounded confidence, if scored.
    pub confidence_percent: Option<u32>,
    /// Supporting snippet.
    pub evidence: Option<String>,
}

/// Everything the compliance panel renders, derived from a validated
/// summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CompliancePanel {
    /// Backend percentage, as sent.
    pub percentage: f64,
    /// Colour band of `percentage`.
    pub band: ComplianceBand,
    /// Indicator geometry at [`RING_RADIUS`].
    pub arc: RingArc,
    /// Requirements scored.
    pub total: u64,
    /// Compliant count.
    pub compliant: u64,
    /// Non-compliant count.
    pub non_compliant: u64,
    /// Pending count.
    pub pending: u64,
    /// Rows in backend order.
    pub rows: Vec<ResultRow>,
}

impl CompliancePanel {
    /// Derive the panel. Expects a summary that passed [`validate_summary`].
    pub fn from_summary(summary: &ComplianceSummary) -> Self {
        let percentage = summary.overall_compliance_percentage;
        Self {
            percentage,
            band: ComplianceBand::for_percentage(percentage),
            arc: ring_arc(percentage, RING_RADIUS),
            total: summary.total_requirements,
            compliant: summary.compliant_count,
            non_compliant: summary.non_compliant_count,
            pending: summary.pending_count,
            rows: summary
                .results
                .iter()
                .map(|r| ResultRow {
                    name: r.name.clone(),
                    category: r.category.clone(),
                    verdict: r.verdict(),
                    confidence_percent: r.confidence_score.map(confidence_percent),
                    evidence: r.extracted_evidence.clone(),
                })
                .collect(),
        }
    }
}
